//! Verification code policy configuration

use serde::{Deserialize, Serialize};

/// Verification code policy
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Number of decimal digits in a generated code
    pub code_length: usize,

    /// Minutes a code stays valid after it is issued
    pub code_ttl_minutes: i64,

    /// Mismatches tolerated before a code is invalidated.
    /// `None` allows unlimited retries until the code expires.
    pub max_attempts: Option<u32>,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            code_ttl_minutes: 10,
            max_attempts: None,
        }
    }
}
