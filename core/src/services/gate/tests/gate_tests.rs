//! Unit tests for mutation gate

use std::sync::Arc;

use ag_shared::ScheduleConfig;

use crate::errors::DomainError;
use crate::services::gate::{AppointmentRequest, GateConfig, ModifyOutcome, ModifyRequest, MutationGate};

use super::mocks::{seeded_event, MockCalendar};

fn request(time: &str) -> AppointmentRequest {
    AppointmentRequest {
        date: "20/10/2026".to_string(),
        time: time.to_string(),
        client_name: "Ana".to_string(),
        client_email: "ana@x.com".to_string(),
        reason: "Contract review".to_string(),
    }
}

fn gate_with(calendar: MockCalendar) -> (MutationGate<MockCalendar>, Arc<MockCalendar>) {
    let calendar = Arc::new(calendar);
    (MutationGate::new(calendar.clone(), GateConfig::default()), calendar)
}

fn modify(event_id: &str, email: &str, date: Option<&str>, time: Option<&str>) -> ModifyRequest {
    ModifyRequest {
        event_id: event_id.to_string(),
        client_email: email.to_string(),
        new_date: date.map(str::to_string),
        new_time: time.map(str::to_string),
    }
}

// Owned through the description marker only, like historical events
fn legacy_event() -> MockCalendar {
    MockCalendar::new().with_event(seeded_event(
        "evt_legacy",
        "2026-10-20T10:00:00-05:00",
        "Reason: Divorce\nCorreo: ana@x.com",
        &[],
        None,
    ))
}

#[tokio::test]
async fn test_create_requires_verification() {
    let (gate, calendar) = gate_with(MockCalendar::new());

    for time in ["08:00", "10:00", "garbage"] {
        let err = gate.create(false, &request(time)).await.unwrap_err();
        assert_eq!(err, DomainError::VerificationRequired { action: "create" });
    }
    assert_eq!(calendar.call_count(), 0);
}

#[tokio::test]
async fn test_create_business_hours_window() {
    let (gate, calendar) = gate_with(MockCalendar::new());

    for (time, allowed) in [("08:59", false), ("09:00", true), ("16:59", true), ("17:00", false)] {
        let result = gate.create(true, &request(time)).await;
        if allowed {
            assert!(result.is_ok(), "{} should be accepted", time);
        } else {
            assert!(
                matches!(result, Err(DomainError::OutsideBusinessHours { .. })),
                "{} should be refused",
                time
            );
        }
    }
    assert_eq!(calendar.call_count(), 2);
}

#[tokio::test]
async fn test_create_window_ignores_weekday() {
    let (gate, _calendar) = gate_with(MockCalendar::new());
    let mut saturday = request("10:00");
    saturday.date = "24/10/2026".to_string();

    assert!(gate.create(true, &saturday).await.is_ok());
}

#[tokio::test]
async fn test_create_builds_owned_event() {
    let (gate, calendar) = gate_with(MockCalendar::new());

    let created = gate.create(true, &request("10:30")).await.unwrap();
    let id = created.id.clone().unwrap();

    assert_eq!(created.summary, "Appointment with Ana");
    assert_eq!(created.description, "Reason: Contract review\nCorreo: ana@x.com");
    assert_eq!(created.attendees, vec!["ana@x.com".to_string()]);
    assert_eq!(created.authorized_email.as_deref(), Some("ana@x.com"));
    assert_eq!(created.start.to_rfc3339(), "2026-10-20T10:30:00-05:00");
    assert_eq!(created.end.to_rfc3339(), "2026-10-20T11:30:00-05:00");
    assert_eq!(calendar.get(&id), Some(created));
}

#[tokio::test]
async fn test_create_rejects_malformed_input() {
    let (gate, calendar) = gate_with(MockCalendar::new());

    let mut bad_date = request("10:00");
    bad_date.date = "2026-10-20".to_string();
    assert!(matches!(
        gate.create(true, &bad_date).await,
        Err(DomainError::Validation { .. })
    ));
    assert!(matches!(
        gate.create(true, &request("ten")).await,
        Err(DomainError::Validation { .. })
    ));
    assert_eq!(calendar.call_count(), 0);
}

#[tokio::test]
async fn test_create_surfaces_backend_failure() {
    let mut calendar = MockCalendar::new();
    calendar.fail_writes = true;
    let (gate, _calendar) = gate_with(calendar);

    let err = gate.create(true, &request("10:00")).await.unwrap_err();
    assert_eq!(
        err,
        DomainError::Backend {
            message: "quota exceeded".to_string()
        }
    );
}

#[tokio::test]
async fn test_modify_and_cancel_require_verification() {
    let (gate, calendar) = gate_with(legacy_event());

    let err = gate
        .modify(false, &modify("evt_legacy", "ana@x.com", None, Some("11:00")))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::VerificationRequired { action: "modify" });

    let err = gate.cancel(false, "evt_legacy", "ana@x.com").await.unwrap_err();
    assert_eq!(err, DomainError::VerificationRequired { action: "cancel" });

    assert_eq!(calendar.call_count(), 0);
}

#[tokio::test]
async fn test_modify_unknown_event() {
    let (gate, _calendar) = gate_with(MockCalendar::new());

    let err = gate
        .modify(true, &modify("missing", "ana@x.com", None, Some("11:00")))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DomainError::EventNotFound {
            event_id: "missing".to_string()
        }
    );
}

#[tokio::test]
async fn test_lookup_failure_reported_as_not_found() {
    let mut calendar = legacy_event();
    calendar.fail_lookups = true;
    let (gate, _calendar) = gate_with(calendar);

    let err = gate.cancel(true, "evt_legacy", "ana@x.com").await.unwrap_err();
    assert!(matches!(err, DomainError::EventNotFound { .. }));
}

#[tokio::test]
async fn test_modify_and_cancel_refuse_non_owner() {
    let (gate, calendar) = gate_with(legacy_event());

    let err = gate
        .modify(true, &modify("evt_legacy", "mallory@x.com", None, Some("11:00")))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Unauthorized { action: "modify" });

    let err = gate.cancel(true, "evt_legacy", "mallory@x.com").await.unwrap_err();
    assert_eq!(err, DomainError::Unauthorized { action: "cancel" });

    // Only the two lookups reached the backend; the event is untouched
    assert_eq!(calendar.call_count(), 2);
    assert!(calendar.get("evt_legacy").is_some());
}

#[tokio::test]
async fn test_ownership_through_attendees_and_structured_field() {
    let calendar = MockCalendar::new()
        .with_event(seeded_event(
            "evt_attendee",
            "2026-10-20T10:00:00-05:00",
            "",
            &["ana@x.com"],
            None,
        ))
        .with_event(seeded_event(
            "evt_structured",
            "2026-10-21T10:00:00-05:00",
            "",
            &[],
            Some("ana@x.com"),
        ));
    let (gate, calendar) = gate_with(calendar);

    gate.cancel(true, "evt_attendee", "ana@x.com").await.unwrap();
    gate.cancel(true, "evt_structured", "ana@x.com").await.unwrap();
    assert!(calendar.get("evt_attendee").is_none());
    assert!(calendar.get("evt_structured").is_none());
}

#[tokio::test]
async fn test_modify_time_only_keeps_date() {
    let (gate, calendar) = gate_with(legacy_event());

    let outcome = gate
        .modify(true, &modify("evt_legacy", "ana@x.com", None, Some("15:15")))
        .await
        .unwrap();

    let ModifyOutcome::Rescheduled(event) = outcome else {
        panic!("expected a reschedule");
    };
    assert_eq!(event.start.to_rfc3339(), "2026-10-20T15:15:00-05:00");
    assert_eq!(event.end.to_rfc3339(), "2026-10-20T16:15:00-05:00");
    assert_eq!(event.description, "Reason: Divorce\nCorreo: ana@x.com");
    assert_eq!(calendar.get("evt_legacy"), Some(event));
}

#[tokio::test]
async fn test_modify_date_only_keeps_time() {
    let (gate, _calendar) = gate_with(legacy_event());

    let outcome = gate
        .modify(true, &modify("evt_legacy", "ana@x.com", Some("23/10/2026"), None))
        .await
        .unwrap();

    match outcome {
        ModifyOutcome::Rescheduled(event) => {
            assert_eq!(event.start.to_rfc3339(), "2026-10-23T10:00:00-05:00")
        }
        ModifyOutcome::NoChanges => panic!("expected a reschedule"),
    }
}

#[tokio::test]
async fn test_modify_checks_window_on_new_hour() {
    let (gate, calendar) = gate_with(legacy_event());

    let err = gate
        .modify(true, &modify("evt_legacy", "ana@x.com", None, Some("17:00")))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::OutsideBusinessHours { hour: 17, .. }));
    assert_eq!(
        calendar.get("evt_legacy").unwrap().start.to_rfc3339(),
        "2026-10-20T10:00:00-05:00"
    );
}

#[tokio::test]
async fn test_modify_checks_window_on_existing_hour() {
    // An event booked outside today's window cannot be moved to another day as-is
    let calendar = MockCalendar::new().with_event(seeded_event(
        "evt_early",
        "2026-10-20T07:00:00-05:00",
        "Correo: ana@x.com",
        &[],
        None,
    ));
    let (gate, _calendar) = gate_with(calendar);

    let err = gate
        .modify(true, &modify("evt_early", "ana@x.com", Some("21/10/2026"), None))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::OutsideBusinessHours { hour: 7, .. }));
}

#[tokio::test]
async fn test_modify_without_changes() {
    let (gate, calendar) = gate_with(legacy_event());

    let outcome = gate
        .modify(true, &modify("evt_legacy", "ana@x.com", None, None))
        .await
        .unwrap();
    assert_eq!(outcome, ModifyOutcome::NoChanges);
    // Lookup only, no update
    assert_eq!(calendar.call_count(), 1);
}

#[tokio::test]
async fn test_search_orders_and_caps_results() {
    let mut calendar = MockCalendar::new();
    for day in 1..=15 {
        calendar = calendar.with_event(seeded_event(
            &format!("evt_{}", day),
            &format!("2026-11-{:02}T10:00:00-05:00", day),
            "Reason: Tax filing",
            &[],
            None,
        ));
    }
    let (gate, _calendar) = gate_with(calendar);

    let events = gate.search(Some("tax"), Some("03/11/2026")).await.unwrap();
    assert_eq!(events.len(), 10);
    assert_eq!(events[0].id.as_deref(), Some("evt_3"));
    assert!(events.windows(2).all(|pair| pair[0].start <= pair[1].start));

    let none = gate.search(Some("divorce"), None).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_search_rejects_bad_date() {
    let (gate, _calendar) = gate_with(MockCalendar::new());
    assert!(matches!(
        gate.search(None, Some("November 3rd")).await,
        Err(DomainError::Validation { .. })
    ));
}

#[test]
fn test_gate_config_rejects_zero_search_cap() {
    let schedule = ScheduleConfig {
        search_max_results: 0,
        ..Default::default()
    };
    assert!(matches!(
        GateConfig::from_schedule(&schedule),
        Err(DomainError::Validation { .. })
    ));
    assert_eq!(
        GateConfig::from_schedule(&ScheduleConfig::default()).unwrap().search_max_results,
        10
    );
}
