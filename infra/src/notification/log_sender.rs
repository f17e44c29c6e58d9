//! Log-based notification sender
//!
//! Writes every message to the `tracing` pipeline instead of delivering it,
//! and can optionally echo it to the console so codes are visible while
//! developing locally.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use ag_core::errors::DomainResult;
use ag_core::services::verification::NotificationSender;
use ag_shared::email::{is_valid_email, mask_email};

use crate::InfrastructureError;

/// Notification sender that logs messages rather than emailing them
#[derive(Debug, Clone)]
pub struct LogNotificationSender {
    /// Number of messages accepted so far
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
    /// Whether to print messages to the console
    console_output: bool,
}

impl LogNotificationSender {
    pub fn new() -> Self {
        Self::with_options(false, false)
    }

    /// Create a sender with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure,
            console_output,
        }
    }

    /// Total number of messages accepted
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    pub fn set_simulate_failure(&mut self, simulate: bool) {
        self.simulate_failure = simulate;
    }

    fn deliver(&self, recipient: &str, subject: &str, body: &str) -> Result<String, InfrastructureError> {
        if !is_valid_email(recipient) {
            return Err(InfrastructureError::Notification(format!(
                "Invalid recipient address: {}",
                mask_email(recipient)
            )));
        }

        if self.simulate_failure {
            warn!(
                recipient = %mask_email(recipient),
                event = "notification_simulated_failure",
                "Log sender simulating delivery failure"
            );
            return Err(InfrastructureError::Notification(
                "Simulated delivery failure".to_string(),
            ));
        }

        let message_id = format!("log_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("LOG NOTIFICATION SENDER - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", recipient);
            println!("Subject: {}", subject);
            println!("Message ID: {}", message_id);
            println!("{}", body);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "notification",
            provider = "log",
            recipient = %mask_email(recipient),
            subject = subject,
            message_id = %message_id,
            body_length = body.len(),
            "Notification accepted (log)"
        );

        Ok(message_id)
    }
}

impl Default for LogNotificationSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSender for LogNotificationSender {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> DomainResult<String> {
        self.deliver(recipient, subject, body).map_err(Into::into)
    }
}
