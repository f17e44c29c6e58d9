//! Appointment schedule configuration

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Business hours and calendar conventions for appointments
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// IANA name of the reference time zone
    pub timezone: String,

    /// First start hour accepted (inclusive)
    pub open_hour: u32,

    /// Hour at which no appointment may start (exclusive)
    pub close_hour: u32,

    /// Length of an appointment in minutes
    pub appointment_minutes: i64,

    /// Label preceding the client email in event descriptions
    pub owner_marker_label: String,

    /// Maximum number of events returned by a search
    pub search_max_results: usize,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            timezone: String::from("America/Bogota"),
            open_hour: 9,
            close_hour: 17,
            appointment_minutes: 60,
            owner_marker_label: String::from("Correo"),
            search_max_results: 10,
        }
    }
}

impl ScheduleConfig {
    /// Parse the configured reference time zone
    pub fn reference_zone(&self) -> Result<Tz, String> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| format!("Unknown time zone: {}", self.timezone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_zone_parses() {
        let config = ScheduleConfig::default();
        assert_eq!(config.reference_zone().unwrap(), chrono_tz::America::Bogota);
    }

    #[test]
    fn test_unknown_zone() {
        let config = ScheduleConfig {
            timezone: "Mars/Olympus_Mons".to_string(),
            ..Default::default()
        };
        assert!(config.reference_zone().is_err());
    }
}
