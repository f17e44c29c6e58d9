//! Calendar event as seen through the calendar backend contract.
//!
//! Events are never persisted by the gate itself; they are read and written
//! only through a `CalendarBackend` implementation.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Appointment stored in the remote calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Backend identifier, `None` until the event has been inserted
    pub id: Option<String>,

    /// Short title shown in the calendar
    pub summary: String,

    /// Free-text description; historical events may carry the owner's
    /// email only here, as a `"<label>: <email>"` marker
    pub description: String,

    /// Attendee email addresses
    #[serde(default)]
    pub attendees: Vec<String>,

    /// Email permitted to change the event
    #[serde(default)]
    pub authorized_email: Option<String>,

    /// Start instant in the reference time zone
    pub start: DateTime<FixedOffset>,

    /// End instant in the reference time zone
    pub end: DateTime<FixedOffset>,

    /// Link to the event in the provider's UI, when the backend offers one
    #[serde(default)]
    pub html_link: Option<String>,
}

impl CalendarEvent {
    /// Description marker tying an email to an event
    pub fn owner_marker(label: &str, email: &str) -> String {
        format!("{}: {}", label, email)
    }

    /// Best-effort ownership match against stored metadata.
    ///
    /// Accepts the structured `authorized_email` first, then the attendee list,
    /// then the description marker. Matching is exact and case-sensitive. The
    /// marker may sit anywhere in the description but only trailing blanks may
    /// follow it on its line, so `a@x.co` does not own `"Correo: a@x.com"`.
    /// This is not proof of identity; that comes from code verification.
    pub fn is_owned_by(&self, email: &str, marker_label: &str) -> bool {
        if self.authorized_email.as_deref() == Some(email) {
            return true;
        }
        if self.attendees.iter().any(|attendee| attendee == email) {
            return true;
        }
        let marker = Self::owner_marker(marker_label, email);
        self.description.match_indices(&marker).any(|(index, found)| {
            let rest = &self.description[index + found.len()..];
            let line_rest = rest.split(['\r', '\n']).next().unwrap_or_default();
            line_rest.trim().is_empty()
        })
    }

    /// Backend identifier as a string slice
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Filters accepted by `CalendarBackend::list_events`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventQuery {
    /// Case-insensitive text matched against summary and description
    pub text: Option<String>,

    /// Only events starting at or after this instant
    pub time_min: Option<DateTime<FixedOffset>>,

    /// Upper bound on the number of events returned
    pub max_results: usize,
}

impl EventQuery {
    /// Check whether an event satisfies the text and time filters
    pub fn matches(&self, event: &CalendarEvent) -> bool {
        if let Some(time_min) = self.time_min {
            if event.start < time_min {
                return false;
            }
        }
        match self.text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => {
                let needle = text.to_lowercase();
                event.summary.to_lowercase().contains(&needle)
                    || event.description.to_lowercase().contains(&needle)
            }
            _ => true,
        }
    }
}
