//! Verification record entity persisted for each email with an outstanding code.

use chrono::{DateTime, Duration, FixedOffset};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// Whole durable state: email -> outstanding record.
///
/// Ordered so that serialized snapshots are deterministic.
pub type VerificationSnapshot = BTreeMap<String, VerificationRecord>;

/// Outstanding verification code for one email address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// The numeric code, kept as a string so leading zeros survive
    pub code: String,

    /// Absolute expiry in the reference time zone
    pub expires: DateTime<FixedOffset>,

    /// Mismatches recorded against this code (only tracked when attempts are bounded)
    #[serde(default, skip_serializing_if = "is_zero")]
    pub attempts: u32,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl VerificationRecord {
    /// Creates a record for a code issued at `now` that lives for `ttl`
    pub fn issue(code: impl Into<String>, now: DateTime<FixedOffset>, ttl: Duration) -> Self {
        Self {
            code: code.into(),
            expires: now + ttl,
            attempts: 0,
        }
    }

    /// A code is expired strictly after its expiry instant
    pub fn is_expired_at(&self, now: DateTime<FixedOffset>) -> bool {
        now > self.expires
    }

    /// Exact string comparison against a candidate code
    pub fn matches(&self, candidate: &str) -> bool {
        constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }
}
