//! Shared utilities and common types for the appointment gate
//!
//! This crate provides common functionality used across all workspace crates:
//! - Configuration types
//! - Utility functions (email validation and masking)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment, LogFormat, LoggingConfig, ScheduleConfig,
    StorageConfig, VerificationConfig,
};
pub use utils::email;
