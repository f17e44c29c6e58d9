//! In-memory calendar backend for development, demos and tests

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use ag_core::domain::entities::calendar_event::{CalendarEvent, EventQuery};
use ag_core::errors::DomainResult;
use ag_core::services::gate::CalendarBackend;

use crate::InfrastructureError;

/// Calendar holding events in a process-local map
///
/// Inserted events get an `evt_<uuid>` identifier. Clones share the same
/// events and the same failure switch.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCalendar {
    events: Arc<RwLock<BTreeMap<String, CalendarEvent>>>,
    /// When set, every call fails as an unreachable remote calendar would
    simulate_failure: Arc<AtomicBool>,
}

impl InMemoryCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an event, keeping its identifier (one is assigned if missing)
    pub async fn seed(&self, mut event: CalendarEvent) -> String {
        let id = event.id.clone().unwrap_or_else(new_event_id);
        event.id = Some(id.clone());
        self.events.write().await.insert(id.clone(), event);
        id
    }

    /// Number of stored events
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }

    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), InfrastructureError> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err(InfrastructureError::Calendar(
                "Simulated calendar outage".to_string(),
            ));
        }
        Ok(())
    }
}

fn new_event_id() -> String {
    format!("evt_{}", Uuid::new_v4().simple())
}

fn not_found(event_id: &str) -> InfrastructureError {
    InfrastructureError::Calendar(format!("Event {} does not exist", event_id))
}

#[async_trait]
impl CalendarBackend for InMemoryCalendar {
    async fn get_event(&self, event_id: &str) -> DomainResult<Option<CalendarEvent>> {
        self.check_available()?;
        Ok(self.events.read().await.get(event_id).cloned())
    }

    async fn insert_event(&self, mut event: CalendarEvent) -> DomainResult<CalendarEvent> {
        self.check_available()?;
        let id = new_event_id();
        event.id = Some(id.clone());
        self.events.write().await.insert(id.clone(), event.clone());
        debug!(event_id = %id, event = "calendar_event_inserted", "Event inserted");
        Ok(event)
    }

    async fn update_event(&self, event_id: &str, mut event: CalendarEvent) -> DomainResult<CalendarEvent> {
        self.check_available()?;
        let mut events = self.events.write().await;
        let slot = events.get_mut(event_id).ok_or_else(|| not_found(event_id))?;
        event.id = Some(event_id.to_string());
        *slot = event.clone();
        debug!(event_id = %event_id, event = "calendar_event_updated", "Event updated");
        Ok(event)
    }

    async fn delete_event(&self, event_id: &str) -> DomainResult<()> {
        self.check_available()?;
        self.events
            .write()
            .await
            .remove(event_id)
            .ok_or_else(|| not_found(event_id))?;
        debug!(event_id = %event_id, event = "calendar_event_deleted", "Event deleted");
        Ok(())
    }

    async fn list_events(&self, query: &EventQuery) -> DomainResult<Vec<CalendarEvent>> {
        self.check_available()?;
        let mut events: Vec<CalendarEvent> = self
            .events
            .read()
            .await
            .values()
            .filter(|event| query.matches(event))
            .cloned()
            .collect();
        events.sort_by_key(|event| event.start);
        if query.max_results > 0 {
            events.truncate(query.max_results);
        }
        Ok(events)
    }
}
