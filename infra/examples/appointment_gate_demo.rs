//! Walk through the verification gate end to end
//!
//! Run with `cargo run -p ag_infra --example appointment_gate_demo`.
//! Codes are written to a temporary snapshot and echoed by the log sender.

use std::sync::Arc;

use ag_core::services::assistant::AppointmentTools;
use ag_core::services::clock::SystemClock;
use ag_core::services::code_generator::RandomCodeGenerator;
use ag_core::services::gate::{AppointmentRequest, GateConfig, MutationGate};
use ag_core::services::verification::{VerificationService, VerificationServiceConfig, VerificationStore};
use ag_infra::{init_tracing, load_config, FileVerificationStore, InMemoryCalendar, LogNotificationSender};
use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = load_config(None).context("loading configuration")?;
    let workdir = tempfile::tempdir()?;
    config.storage.path = workdir.path().join("verification_codes.json");
    init_tracing(&config.logging)?;

    println!("=== Appointment Gate Demo ===\n");

    let zone = config.schedule.reference_zone().map_err(anyhow::Error::msg)?;
    let clock = Arc::new(SystemClock::new(zone));
    let store = FileVerificationStore::from_config(&config.storage);
    let calendar = InMemoryCalendar::new();

    let verification = Arc::new(VerificationService::new(
        Arc::new(store.clone()),
        Arc::new(RandomCodeGenerator::new(config.verification.code_length)),
        clock.clone(),
        VerificationServiceConfig::from(&config.verification),
    ));
    let gate = Arc::new(MutationGate::new(
        Arc::new(calendar.clone()),
        GateConfig::from_schedule(&config.schedule)?,
    ));
    let tools = AppointmentTools::new(
        verification,
        gate,
        Arc::new(LogNotificationSender::with_options(true, false)),
        clock,
    );

    println!("{}\n", tools.current_datetime());

    let email = "ana@example.com";
    let request = AppointmentRequest {
        date: "20/10/2026".to_string(),
        time: "10:00".to_string(),
        client_name: "Ana".to_string(),
        client_email: email.to_string(),
        reason: "Contract review".to_string(),
    };

    println!("Booking without verification:");
    println!("  {}\n", tools.create_appointment(&request, false).await);

    println!("Sending verification code:");
    println!("  {}\n", tools.send_verification_code(email).await);

    let code = store
        .load()
        .await?
        .get(email)
        .map(|record| record.code.clone())
        .context("code was not stored")?;

    println!("Verifying with a wrong code:");
    println!("  {}\n", tools.verify_code(email, "not-the-code").await.message);

    let reply = tools.verify_code(email, &code).await;
    println!("Verifying with the emailed code:");
    println!("  {}\n", reply.message);

    println!("Booking after verification:");
    println!("  {}\n", tools.create_appointment(&request, reply.verified).await);

    println!("Appointments on file:");
    println!("{}", tools.search_appointments(None, None).await);

    Ok(())
}
