//! Configuration for the mutation gate

use ag_shared::ScheduleConfig;
use chrono_tz::Tz;

use crate::errors::{DomainError, DomainResult};

/// Resolved schedule rules used by the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Reference time zone for parsing and rendering appointment times
    pub zone: Tz,
    /// First start hour accepted (inclusive)
    pub open_hour: u32,
    /// First start hour refused (exclusive upper bound)
    pub close_hour: u32,
    /// Appointment length in minutes
    pub appointment_minutes: i64,
    /// Label of the `"<label>: <email>"` ownership marker
    pub owner_marker_label: String,
    /// Maximum number of search results
    pub search_max_results: usize,
}

impl GateConfig {
    /// Build from the shared schedule configuration
    pub fn from_schedule(schedule: &ScheduleConfig) -> DomainResult<Self> {
        let zone = schedule
            .reference_zone()
            .map_err(|message| DomainError::Validation { message })?;
        if schedule.search_max_results == 0 {
            return Err(DomainError::Validation {
                message: "search_max_results must be greater than zero".to_string(),
            });
        }
        Ok(Self {
            zone,
            open_hour: schedule.open_hour,
            close_hour: schedule.close_hour,
            appointment_minutes: schedule.appointment_minutes,
            owner_marker_label: schedule.owner_marker_label.clone(),
            search_max_results: schedule.search_max_results,
        })
    }

    /// Refuse start hours outside `[open_hour, close_hour)`
    pub fn check_hour(&self, hour: u32) -> DomainResult<()> {
        if hour >= self.open_hour && hour < self.close_hour {
            Ok(())
        } else {
            Err(DomainError::OutsideBusinessHours {
                hour,
                open_hour: self.open_hour,
                close_hour: self.close_hour,
            })
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        let schedule = ScheduleConfig::default();
        Self {
            zone: chrono_tz::America::Bogota,
            open_hour: schedule.open_hour,
            close_hour: schedule.close_hour,
            appointment_minutes: schedule.appointment_minutes,
            owner_marker_label: schedule.owner_marker_label,
            search_max_results: schedule.search_max_results,
        }
    }
}
