//! Integration tests for the file-backed verification store

use std::fs;
use std::sync::Arc;

use ag_core::services::clock::{Clock, ManualClock};
use ag_core::services::code_generator::RandomCodeGenerator;
use ag_core::services::verification::{
    VerificationService, VerificationServiceConfig, VerificationStore, VerifyOutcome,
};
use ag_infra::FileVerificationStore;
use chrono::{Duration, TimeZone, Utc};
use chrono_tz::America::Bogota;
use tempfile::TempDir;

fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Bogota,
        Utc.with_ymd_and_hms(2026, 10, 19, 15, 0, 0).unwrap(),
    ))
}

fn service_for(
    store: FileVerificationStore,
    clock: Arc<ManualClock>,
) -> VerificationService<FileVerificationStore> {
    VerificationService::new(
        Arc::new(store),
        Arc::new(RandomCodeGenerator::default()),
        clock,
        VerificationServiceConfig::default(),
    )
}

#[tokio::test]
async fn test_codes_survive_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("verification_codes.json");
    let clock = clock();

    let issued = {
        let service = service_for(FileVerificationStore::new(&path), clock.clone());
        service.issue_code("ana@x.com").await.unwrap()
    };

    // A fresh handle, as after a process restart
    let service = service_for(FileVerificationStore::new(&path), clock.clone());
    clock.advance(Duration::minutes(3));
    let outcome = service.consume_code("ana@x.com", &issued.code).await.unwrap();
    assert_eq!(outcome, VerifyOutcome::Verified);

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw, serde_json::json!({}));
}

#[tokio::test]
async fn test_snapshot_records_expiry_in_reference_zone() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("verification_codes.json");
    let clock = clock();
    let service = service_for(FileVerificationStore::new(&path), clock.clone());

    let issued = service.issue_code("ana@x.com").await.unwrap();
    assert_eq!(issued.expires_at, clock.now() + Duration::minutes(10));

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["ana@x.com"]["code"], issued.code.as_str());
    assert_eq!(raw["ana@x.com"]["expires"], "2026-10-19T10:10:00-05:00");
}

#[tokio::test]
async fn test_writes_leave_no_temporary_files() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("verification_codes.json");
    let service = service_for(FileVerificationStore::new(&path), clock());

    for i in 0..10 {
        service.issue_code(&format!("client{}@x.com", i)).await.unwrap();
    }

    let mut names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "verification_codes.json".to_string(),
            "verification_codes.json.lock".to_string()
        ]
    );
}

#[tokio::test]
async fn test_corrupt_snapshot_is_replaced_on_next_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("verification_codes.json");
    fs::write(&path, "not json at all").unwrap();

    let store = FileVerificationStore::new(&path);
    let service = service_for(store.clone(), clock());

    assert_eq!(
        service.consume_code("ana@x.com", "123456").await.unwrap(),
        VerifyOutcome::NotFound
    );
    let issued = service.issue_code("ana@x.com").await.unwrap();

    let snapshot = store.load().await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot["ana@x.com"].code, issued.code);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_issuers_with_independent_handles() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("verification_codes.json");
    let clock = clock();

    let mut handles = Vec::new();
    for i in 0..32 {
        // Separate store and service per task, sharing only the path
        let service = service_for(FileVerificationStore::new(&path), clock.clone());
        handles.push(tokio::spawn(async move {
            service.issue_code(&format!("client{}@x.com", i)).await.unwrap()
        }));
    }

    let mut issued = Vec::new();
    for handle in handles {
        issued.push(handle.await.unwrap());
    }

    let snapshot = FileVerificationStore::new(&path).load().await.unwrap();
    assert_eq!(snapshot.len(), 32);
    for code in &issued {
        assert_eq!(snapshot[&code.email].code, code.code);
    }
}
