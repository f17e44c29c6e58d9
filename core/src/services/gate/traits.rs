//! Calendar backend contract

use async_trait::async_trait;

use crate::domain::entities::calendar_event::{CalendarEvent, EventQuery};
use crate::errors::DomainResult;

/// Remote calendar service holding the appointments
///
/// Errors are reported as `DomainError::Backend` and surfaced verbatim by
/// the gate, except for lookups, which the gate reports as "not found".
#[async_trait]
pub trait CalendarBackend: Send + Sync {
    /// Fetch an event by identifier; `Ok(None)` when it does not exist
    async fn get_event(&self, event_id: &str) -> DomainResult<Option<CalendarEvent>>;

    /// Insert a new event and return it with its assigned identifier
    async fn insert_event(&self, event: CalendarEvent) -> DomainResult<CalendarEvent>;

    /// Replace an existing event
    async fn update_event(&self, event_id: &str, event: CalendarEvent) -> DomainResult<CalendarEvent>;

    /// Delete an event
    async fn delete_event(&self, event_id: &str) -> DomainResult<()>;

    /// List events matching the query
    async fn list_events(&self, query: &EventQuery) -> DomainResult<Vec<CalendarEvent>>;
}
