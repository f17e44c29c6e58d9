//! Mutation gate implementation

use ag_shared::email::mask_email;
use chrono::{Duration, NaiveTime, TimeZone, Timelike};
use std::sync::Arc;
use tracing;

use crate::domain::entities::calendar_event::{CalendarEvent, EventQuery};
use crate::errors::{DomainError, DomainResult};

use super::config::GateConfig;
use super::schedule::{localize, parse_date, parse_time};
use super::traits::CalendarBackend;
use super::types::{AppointmentRequest, ModifyOutcome, ModifyRequest};

/// Guards every state-mutating calendar operation.
///
/// The `verified` flag comes from a successful code consumption upstream;
/// the gate never checks codes itself. Refusals are returned as typed
/// `DomainError` values and never reach the backend.
pub struct MutationGate<B: CalendarBackend> {
    /// Remote calendar
    backend: Arc<B>,
    /// Schedule rules
    config: GateConfig,
}

impl<B: CalendarBackend> MutationGate<B> {
    /// Create a new mutation gate
    pub fn new(backend: Arc<B>, config: GateConfig) -> Self {
        Self { backend, config }
    }

    /// Gate configuration
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Create an appointment for a verified client
    ///
    /// # Returns
    ///
    /// * `Ok(CalendarEvent)` - The inserted event with its backend identifier
    /// * `Err(DomainError::VerificationRequired)` - `verified` was false
    /// * `Err(DomainError::OutsideBusinessHours)` - Start hour outside the window
    /// * `Err(DomainError::Validation)` - Malformed date or time
    /// * `Err(DomainError::Backend)` - The calendar rejected the insert
    pub async fn create(&self, verified: bool, request: &AppointmentRequest) -> DomainResult<CalendarEvent> {
        if !verified {
            tracing::warn!(
                email = %mask_email(&request.client_email),
                event = "create_refused_unverified",
                "Refused to create appointment without verification"
            );
            return Err(DomainError::VerificationRequired { action: "create" });
        }

        let time = parse_time(&request.time)?;
        self.config.check_hour(time.hour())?;
        let date = parse_date(&request.date)?;
        let start = localize(self.config.zone, date, time)?;

        let event = CalendarEvent {
            id: None,
            summary: format!("Appointment with {}", request.client_name),
            description: format!(
                "Reason: {}\n{}",
                request.reason,
                CalendarEvent::owner_marker(&self.config.owner_marker_label, &request.client_email)
            ),
            attendees: vec![request.client_email.clone()],
            authorized_email: Some(request.client_email.clone()),
            start,
            end: start + self.appointment_length(),
            html_link: None,
        };

        let created = self.backend.insert_event(event).await?;
        tracing::info!(
            email = %mask_email(&request.client_email),
            event_id = created.id().unwrap_or_default(),
            start = %created.start,
            event = "appointment_created",
            "Appointment created"
        );
        Ok(created)
    }

    /// Reschedule an appointment owned by a verified client
    ///
    /// The missing half of the new start (date or time) is taken from the
    /// event's current start in the reference zone, and the business-hours
    /// window is checked against the resulting hour.
    pub async fn modify(&self, verified: bool, request: &ModifyRequest) -> DomainResult<ModifyOutcome> {
        if !verified {
            tracing::warn!(
                email = %mask_email(&request.client_email),
                event_id = %request.event_id,
                event = "modify_refused_unverified",
                "Refused to modify appointment without verification"
            );
            return Err(DomainError::VerificationRequired { action: "modify" });
        }

        let event = self
            .fetch_owned(&request.event_id, &request.client_email, "modify")
            .await?;

        if request.new_date.is_none() && request.new_time.is_none() {
            return Ok(ModifyOutcome::NoChanges);
        }

        let current = event.start.with_timezone(&self.config.zone);
        let date = match &request.new_date {
            Some(value) => parse_date(value)?,
            None => current.date_naive(),
        };
        let time = match &request.new_time {
            Some(value) => parse_time(value)?,
            None => NaiveTime::from_hms_opt(current.hour(), current.minute(), 0)
                .unwrap_or(current.time()),
        };
        self.config.check_hour(time.hour())?;

        let start = localize(self.config.zone, date, time)?;
        let updated = CalendarEvent {
            start,
            end: start + self.appointment_length(),
            ..event
        };

        let saved = self.backend.update_event(&request.event_id, updated).await?;
        tracing::info!(
            email = %mask_email(&request.client_email),
            event_id = %request.event_id,
            start = %saved.start,
            event = "appointment_rescheduled",
            "Appointment rescheduled"
        );
        Ok(ModifyOutcome::Rescheduled(saved))
    }

    /// Cancel an appointment owned by a verified client
    pub async fn cancel(&self, verified: bool, event_id: &str, client_email: &str) -> DomainResult<()> {
        if !verified {
            tracing::warn!(
                email = %mask_email(client_email),
                event_id = %event_id,
                event = "cancel_refused_unverified",
                "Refused to cancel appointment without verification"
            );
            return Err(DomainError::VerificationRequired { action: "cancel" });
        }

        self.fetch_owned(event_id, client_email, "cancel").await?;
        self.backend.delete_event(event_id).await?;

        tracing::info!(
            email = %mask_email(client_email),
            event_id = %event_id,
            event = "appointment_cancelled",
            "Appointment cancelled"
        );
        Ok(())
    }

    /// Search appointments; read-only, so no verification is needed
    ///
    /// # Arguments
    ///
    /// * `text` - Optional free text matched against summary and description
    /// * `time_min` - Optional `DD/MM/YYYY`; only events from that day on
    pub async fn search(&self, text: Option<&str>, time_min: Option<&str>) -> DomainResult<Vec<CalendarEvent>> {
        let time_min = match time_min {
            Some(value) => {
                let date = parse_date(value)?;
                let midnight = date.and_time(NaiveTime::MIN);
                // Earliest valid local instant of that day
                let start = self
                    .config
                    .zone
                    .from_local_datetime(&midnight)
                    .earliest()
                    .map(|dt| dt.fixed_offset())
                    .ok_or_else(|| DomainError::Validation {
                        message: format!("Start of {} is not representable", value),
                    })?;
                Some(start)
            }
            None => None,
        };

        let query = EventQuery {
            text: text.map(str::to_string),
            time_min,
            max_results: self.config.search_max_results,
        };

        let mut events = self.backend.list_events(&query).await?;
        events.sort_by_key(|event| event.start);
        events.truncate(query.max_results);
        Ok(events)
    }

    /// Look up an event and check the acting email owns it
    async fn fetch_owned(&self, event_id: &str, client_email: &str, action: &'static str) -> DomainResult<CalendarEvent> {
        let event = match self.backend.get_event(event_id).await {
            Ok(Some(event)) => event,
            Ok(None) => {
                return Err(DomainError::EventNotFound {
                    event_id: event_id.to_string(),
                })
            }
            Err(e) => {
                tracing::warn!(
                    event_id = %event_id,
                    error = %e,
                    event = "event_lookup_failed",
                    "Calendar lookup failed; reporting event as not found"
                );
                return Err(DomainError::EventNotFound {
                    event_id: event_id.to_string(),
                });
            }
        };

        if !event.is_owned_by(client_email, &self.config.owner_marker_label) {
            tracing::warn!(
                email = %mask_email(client_email),
                event_id = %event_id,
                action = action,
                event = "ownership_check_failed",
                "Client does not own the appointment"
            );
            return Err(DomainError::Unauthorized { action });
        }

        Ok(event)
    }

    fn appointment_length(&self) -> Duration {
        Duration::minutes(self.config.appointment_minutes)
    }
}
