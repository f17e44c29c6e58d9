//! Appointment tools returning user-facing outcomes

use ag_shared::email::mask_email;
use serde::Serialize;
use std::sync::Arc;
use tracing;

use crate::domain::entities::calendar_event::CalendarEvent;
use crate::errors::DomainError;
use crate::services::clock::Clock;
use crate::services::gate::{AppointmentRequest, CalendarBackend, ModifyOutcome, ModifyRequest, MutationGate};
use crate::services::verification::{NotificationSender, VerificationService, VerificationStore, VerifyOutcome};

/// Subject line of verification emails
const VERIFICATION_SUBJECT: &str = "Verification code - Appointment";

/// Outcome of a verification attempt as handed back to the agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReply {
    /// Pass this to create/modify/cancel as `is_verified`
    pub verified: bool,
    /// Message to relay to the client
    pub message: String,
}

/// Search hit rendered for the agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentSummary {
    pub id: String,
    pub title: String,
    pub start: String,
    pub description: String,
}

impl From<&CalendarEvent> for AppointmentSummary {
    fn from(event: &CalendarEvent) -> Self {
        Self {
            id: event.id.clone().unwrap_or_default(),
            title: event.summary.clone(),
            start: event.start.to_rfc3339(),
            description: if event.description.is_empty() {
                "No description".to_string()
            } else {
                event.description.clone()
            },
        }
    }
}

/// Agent-facing operations over the verification gate
pub struct AppointmentTools<S, B, N>
where
    S: VerificationStore,
    B: CalendarBackend,
    N: NotificationSender,
{
    verification: Arc<VerificationService<S>>,
    gate: Arc<MutationGate<B>>,
    notifier: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<S, B, N> AppointmentTools<S, B, N>
where
    S: VerificationStore,
    B: CalendarBackend,
    N: NotificationSender,
{
    pub fn new(
        verification: Arc<VerificationService<S>>,
        gate: Arc<MutationGate<B>>,
        notifier: Arc<N>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            verification,
            gate,
            notifier,
            clock,
        }
    }

    /// Issue a code and deliver it to the client's inbox.
    ///
    /// A delivery failure is reported but the stored code is kept; asking
    /// again issues a new code that replaces it.
    pub async fn send_verification_code(&self, email: &str) -> String {
        let issued = match self.verification.issue_code(email).await {
            Ok(issued) => issued,
            Err(e) => return format!("Could not send verification code: {}", e),
        };

        let body = format!(
            "Hello,\n\nYour verification code is: {}\n\nThis code will expire in {} minutes.\n\nRegards,\nVirtual Assistant",
            issued.code,
            self.verification.code_ttl_minutes()
        );

        match self.notifier.send(email, VERIFICATION_SUBJECT, &body).await {
            Ok(message_id) => {
                tracing::info!(
                    email = %mask_email(email),
                    message_id = %message_id,
                    event = "code_delivered",
                    "Verification code delivered"
                );
                "Verification code sent. Please check your email.".to_string()
            }
            Err(e) => {
                tracing::warn!(
                    email = %mask_email(email),
                    error = %e,
                    event = "code_delivery_failed",
                    "Verification code stored but delivery failed"
                );
                format!("Could not send verification code: {}", e)
            }
        }
    }

    /// Check a code the client typed
    pub async fn verify_code(&self, email: &str, code: &str) -> VerificationReply {
        let outcome = match self.verification.consume_code(email, code).await {
            Ok(outcome) => outcome,
            Err(e) => {
                return VerificationReply {
                    verified: false,
                    message: format!("Could not verify code: {}", e),
                }
            }
        };

        let message = match outcome {
            VerifyOutcome::Verified => "Code verified.".to_string(),
            VerifyOutcome::Mismatch {
                remaining_attempts: Some(remaining),
            } => format!("Invalid verification code. {} attempt(s) remaining", remaining),
            other => match other.into_result() {
                Err(e) => e.to_string(),
                Ok(()) => "Code verified.".to_string(),
            },
        };

        VerificationReply {
            verified: outcome.is_verified(),
            message,
        }
    }

    /// Book an appointment
    pub async fn create_appointment(&self, request: &AppointmentRequest, is_verified: bool) -> String {
        match self.gate.create(is_verified, request).await {
            Ok(event) => {
                let local = event.start.with_timezone(&self.gate.config().zone);
                let mut message = format!(
                    "Appointment booked for {} at {}.",
                    local.format("%d/%m/%Y"),
                    local.format("%H:%M")
                );
                if let Some(link) = &event.html_link {
                    message.push_str(&format!(" Link: {}", link));
                }
                message
            }
            Err(e) => describe_failure("book the appointment", &e),
        }
    }

    /// Move an appointment to a new date and/or time
    pub async fn modify_appointment(&self, request: &ModifyRequest, is_verified: bool) -> String {
        match self.gate.modify(is_verified, request).await {
            Ok(ModifyOutcome::Rescheduled(event)) => {
                let local = event.start.with_timezone(&self.gate.config().zone);
                format!(
                    "Appointment rescheduled. New time: {} at {}",
                    local.format("%d/%m/%Y"),
                    local.format("%H:%M")
                )
            }
            Ok(ModifyOutcome::NoChanges) => "No changes were specified for the appointment".to_string(),
            Err(e) => describe_failure("modify the appointment", &e),
        }
    }

    /// Cancel an appointment
    pub async fn cancel_appointment(&self, event_id: &str, client_email: &str, is_verified: bool) -> String {
        match self.gate.cancel(is_verified, event_id, client_email).await {
            Ok(()) => "Appointment cancelled. If you need to reschedule, just ask.".to_string(),
            Err(e) => describe_failure("cancel the appointment", &e),
        }
    }

    /// Search appointments, rendered as a JSON list
    pub async fn search_appointments(&self, query: Option<&str>, time_min: Option<&str>) -> String {
        let events = match self.gate.search(query, time_min).await {
            Ok(events) => events,
            Err(e) => return describe_failure("search appointments", &e),
        };
        if events.is_empty() {
            return "No appointments found.".to_string();
        }

        let summaries: Vec<AppointmentSummary> = events.iter().map(AppointmentSummary::from).collect();
        match serde_json::to_string_pretty(&summaries) {
            Ok(json) => json,
            Err(e) => format!("Error trying to search appointments: {}", e),
        }
    }

    /// Current date and time in the reference zone, with the weekday
    pub fn current_datetime(&self) -> String {
        let now = self.clock.now();
        format!("Today is {}", now.format("%A %d/%m/%Y, %I:%M %p"))
    }
}

// Business refusals read well on their own; collaborator failures get context
fn describe_failure(action: &str, error: &DomainError) -> String {
    if error.is_business_outcome() {
        error.to_string()
    } else {
        format!("Error trying to {}: {}", action, error)
    }
}
