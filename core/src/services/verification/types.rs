//! Types for verification service results

use chrono::{DateTime, FixedOffset};

use crate::errors::{DomainError, DomainResult};

/// A freshly issued code, handed to the caller for out-of-band delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCode {
    /// Email the code is bound to
    pub email: String,
    /// The verification code
    pub code: String,
    /// When the code stops being accepted
    pub expires_at: DateTime<FixedOffset>,
}

/// Result of consuming a candidate code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Code matched; the record has been deleted
    Verified,
    /// No code is outstanding for the email
    NotFound,
    /// The code had expired; the record has been deleted
    Expired,
    /// Candidate did not match; the record is kept
    Mismatch {
        /// Tries left before the code is discarded, when attempts are bounded
        remaining_attempts: Option<u32>,
    },
    /// The last allowed mismatch was used; the record has been deleted
    AttemptsExhausted,
}

impl VerifyOutcome {
    /// Whether the caller may treat the email as verified
    pub fn is_verified(&self) -> bool {
        matches!(self, VerifyOutcome::Verified)
    }

    /// Map non-verified outcomes onto the domain error taxonomy
    pub fn into_result(self) -> DomainResult<()> {
        match self {
            VerifyOutcome::Verified => Ok(()),
            VerifyOutcome::NotFound => Err(DomainError::CodeNotFound),
            VerifyOutcome::Expired => Err(DomainError::CodeExpired),
            VerifyOutcome::Mismatch { .. } => Err(DomainError::CodeMismatch),
            VerifyOutcome::AttemptsExhausted => Err(DomainError::TooManyAttempts),
        }
    }
}
