//! Configuration for the verification service

use ag_shared::VerificationConfig;

use crate::domain::entities::verification_record::{CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES};

/// Configuration for the verification service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationServiceConfig {
    /// Number of digits in generated codes
    pub code_length: usize,
    /// Number of minutes before a verification code expires
    pub code_expiration_minutes: i64,
    /// Mismatches tolerated before the code is discarded; `None` is unlimited
    pub max_attempts: Option<u32>,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_length: CODE_LENGTH,
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            max_attempts: None,
        }
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            code_length: config.code_length,
            code_expiration_minutes: config.code_ttl_minutes,
            max_attempts: config.max_attempts,
        }
    }
}
