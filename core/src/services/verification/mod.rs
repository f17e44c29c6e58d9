//! Verification service module for email-based identity checks
//!
//! This module provides the verification code workflow:
//! - Code generation and durable storage per email
//! - Single-use consumption with expiry enforcement
//! - Optional bounded attempt counting
//! - The storage and notification contracts the workflow depends on

mod config;
mod memory_store;
mod service;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use config::VerificationServiceConfig;
pub use memory_store::MemoryVerificationStore;
pub use service::VerificationService;
pub use traits::{Commit, NotificationSender, VerificationStore};
pub use types::{IssuedCode, VerifyOutcome};
