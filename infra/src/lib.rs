//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the core services depend on:
//!
//! - **Storage**: JSON snapshot of outstanding verification codes, guarded by
//!   a cross-process file lock and replaced atomically on every write
//! - **Notification**: Log-based email delivery for development and testing
//! - **Calendar**: In-memory calendar backend
//! - **Config**: Layered configuration loading (defaults, TOML file, environment)
//! - **Telemetry**: `tracing` subscriber setup

use ag_core::errors::DomainError;

pub mod calendar;
pub mod settings;
pub mod notification;
pub mod storage;
pub mod telemetry;

pub use calendar::InMemoryCalendar;
pub use settings::load_config;
pub use notification::LogNotificationSender;
pub use storage::FileVerificationStore;
pub use telemetry::init_tracing;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration source error
    #[error("Configuration error: {0}")]
    ConfigSource(#[from] ::config::ConfigError),

    /// Configuration rejected by validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Notification delivery error
    #[error("Notification error: {0}")]
    Notification(String),

    /// Calendar backend error
    #[error("Calendar error: {0}")]
    Calendar(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Io(_) | InfrastructureError::Serialization(_) => DomainError::Storage {
                message: err.to_string(),
            },
            InfrastructureError::Notification(message) | InfrastructureError::Calendar(message) => {
                DomainError::Backend { message }
            }
            other => DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}
