//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `environment` - Environment detection and logging configuration
//! - `verification` - Verification code policy
//! - `storage` - Location of the durable verification snapshot
//! - `schedule` - Business hours, time zone and calendar conventions

pub mod environment;
pub mod schedule;
pub mod storage;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use schedule::ScheduleConfig;
pub use storage::StorageConfig;
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Verification code policy
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Snapshot storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Appointment schedule
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Create configuration for an environment with matching logging defaults
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            logging: LoggingConfig::for_environment(environment),
            ..Default::default()
        }
    }

    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.verification.code_length == 0 {
            return Err("verification.code_length must be greater than zero".to_string());
        }
        if self.verification.code_ttl_minutes <= 0 {
            return Err("verification.code_ttl_minutes must be positive".to_string());
        }
        if self.verification.max_attempts == Some(0) {
            return Err("verification.max_attempts must be at least 1 when set".to_string());
        }
        if self.schedule.close_hour > 24 {
            return Err(format!(
                "schedule.close_hour must not exceed 24 (got {})",
                self.schedule.close_hour
            ));
        }
        if self.schedule.open_hour >= self.schedule.close_hour {
            return Err(format!(
                "schedule.open_hour ({}) must be earlier than schedule.close_hour ({})",
                self.schedule.open_hour, self.schedule.close_hour
            ));
        }
        if self.schedule.appointment_minutes <= 0 {
            return Err("schedule.appointment_minutes must be positive".to_string());
        }
        if self.schedule.search_max_results == 0 {
            return Err("schedule.search_max_results must be greater than zero".to_string());
        }
        self.schedule.reference_zone()?;
        Ok(())
    }
}
