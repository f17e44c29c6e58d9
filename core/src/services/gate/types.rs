//! Request and result types for gated calendar operations

use crate::domain::entities::calendar_event::CalendarEvent;

/// New appointment requested by a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentRequest {
    /// Day in `DD/MM/YYYY`
    pub date: String,
    /// Start time in `HH:MM` (24-hour)
    pub time: String,
    pub client_name: String,
    pub client_email: String,
    pub reason: String,
}

/// Reschedule request for an existing appointment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyRequest {
    pub event_id: String,
    /// Acting client; must own the event
    pub client_email: String,
    /// New day in `DD/MM/YYYY`, if changing
    pub new_date: Option<String>,
    /// New start time in `HH:MM`, if changing
    pub new_time: Option<String>,
}

/// Result of a permitted modification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModifyOutcome {
    /// The event was moved; carries the updated event
    Rescheduled(CalendarEvent),
    /// Neither a new date nor a new time was supplied
    NoChanges,
}
