//! Domain-specific error types and error handling.

use thiserror::Error;

/// Core domain errors
///
/// The first group are expected business outcomes and are always recoverable
/// by the caller. `Storage`, `Backend` and `Internal` signal that a
/// collaborator could not complete the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No verification code is pending for this email")]
    CodeNotFound,

    #[error("Verification code expired. Please request a new code")]
    CodeExpired,

    #[error("Invalid verification code")]
    CodeMismatch,

    #[error("Maximum verification attempts exceeded. Please request a new code")]
    TooManyAttempts,

    #[error("Appointment not found: {event_id}")]
    EventNotFound { event_id: String },

    #[error("You are not allowed to {action} this appointment")]
    Unauthorized { action: &'static str },

    #[error("Verification is required to {action} an appointment")]
    VerificationRequired { action: &'static str },

    #[error("Appointments can only start between {open_hour}:00 and {close_hour}:00 (requested hour: {hour})")]
    OutsideBusinessHours {
        hour: u32,
        open_hour: u32,
        close_hour: u32,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Calendar backend error: {message}")]
    Backend { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Whether this error is an expected outcome rather than a collaborator failure
    pub fn is_business_outcome(&self) -> bool {
        !matches!(
            self,
            DomainError::Storage { .. } | DomainError::Backend { .. } | DomainError::Internal { .. }
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
