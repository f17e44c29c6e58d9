//! Parsing and localisation of appointment dates and times

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::errors::{DomainError, DomainResult};

/// Day format accepted from clients
pub(crate) const DATE_FORMAT: &str = "%d/%m/%Y";

/// Time format accepted from clients
pub(crate) const TIME_FORMAT: &str = "%H:%M";

pub(crate) fn parse_date(value: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| DomainError::Validation {
        message: format!("Invalid date '{}', expected DD/MM/YYYY", value),
    })
}

pub(crate) fn parse_time(value: &str) -> DomainResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|_| DomainError::Validation {
        message: format!("Invalid time '{}', expected HH:MM", value),
    })
}

/// Resolve a wall-clock date and time in the reference zone.
///
/// Local times skipped or repeated by a zone transition are refused rather
/// than guessed.
pub(crate) fn localize(zone: Tz, date: NaiveDate, time: NaiveTime) -> DomainResult<DateTime<FixedOffset>> {
    zone.from_local_datetime(&date.and_time(time))
        .single()
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| DomainError::Validation {
            message: format!(
                "{} {} does not exist unambiguously in {}",
                date.format(DATE_FORMAT),
                time.format(TIME_FORMAT),
                zone
            ),
        })
}
