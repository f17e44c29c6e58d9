//! Main verification service implementation

use ag_shared::email::mask_email;
use chrono::Duration;
use std::sync::Arc;
use tracing;

use crate::domain::entities::verification_record::VerificationRecord;
use crate::errors::{DomainError, DomainResult};
use crate::services::clock::Clock;
use crate::services::code_generator::CodeGenerator;

use super::config::VerificationServiceConfig;
use super::traits::{Commit, VerificationStore};
use super::types::{IssuedCode, VerifyOutcome};

/// Verification service issuing and consuming per-email codes
///
/// Each public operation is exactly one locked read-modify-write cycle on the
/// store, so concurrent callers observe every issue/consume as atomic.
pub struct VerificationService<S: VerificationStore> {
    /// Durable code storage
    store: Arc<S>,
    /// Source of new codes
    generator: Arc<dyn CodeGenerator>,
    /// Time source in the reference zone
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<S: VerificationStore> VerificationService<S> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `store` - Snapshot store implementation
    /// * `generator` - Code generator
    /// * `clock` - Clock bound to the reference time zone
    /// * `config` - Service configuration
    pub fn new(
        store: Arc<S>,
        generator: Arc<dyn CodeGenerator>,
        clock: Arc<dyn Clock>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            store,
            generator,
            clock,
            config,
        }
    }

    /// Service configuration
    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Issue a fresh code for an email
    ///
    /// Any outstanding code for the email is overwritten and its TTL reset.
    /// Nothing is sent; delivery is the caller's job, and a failed delivery
    /// does not remove the stored code.
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedCode)` - The code and its expiry
    /// * `Err(DomainError::Internal)` - If the generator produced a code that
    ///   is not `code_length` decimal digits; nothing is stored
    /// * `Err(DomainError::Storage)` - If the snapshot could not be written
    pub async fn issue_code(&self, email: &str) -> DomainResult<IssuedCode> {
        let code = self.generator.generate();
        if code.len() != self.config.code_length || !code.chars().all(|c| c.is_ascii_digit()) {
            tracing::error!(
                email = %mask_email(email),
                generated_length = code.len(),
                expected_length = self.config.code_length,
                event = "code_format_mismatch",
                "Generated verification code does not match the configured format"
            );
            return Err(DomainError::Internal {
                message: format!(
                    "Generated code is not {} decimal digits",
                    self.config.code_length
                ),
            });
        }

        let ttl = Duration::minutes(self.config.code_expiration_minutes);
        let clock = Arc::clone(&self.clock);
        let key = email.to_string();
        let stored_code = code.clone();

        let expires_at = self
            .store
            .update(move |snapshot| {
                let record = VerificationRecord::issue(stored_code, clock.now(), ttl);
                let expires = record.expires;
                snapshot.insert(key, record);
                Commit::Persist(expires)
            })
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(email),
                    error = %e,
                    event = "code_storage_failed",
                    "Failed to store verification code"
                );
                e
            })?;

        tracing::info!(
            email = %mask_email(email),
            expires_at = %expires_at,
            event = "code_issued",
            "Issued verification code"
        );

        Ok(IssuedCode {
            email: email.to_string(),
            code,
            expires_at,
        })
    }

    /// Consume a candidate code for an email
    ///
    /// 1. No record: `NotFound`, nothing written
    /// 2. Expired: record deleted, `Expired`
    /// 3. Exact match: record deleted, `Verified`
    /// 4. Mismatch: record kept (or counted and possibly discarded when
    ///    attempts are bounded)
    ///
    /// # Returns
    ///
    /// * `Ok(VerifyOutcome)` - The outcome of the check
    /// * `Err(DomainError::Storage)` - If a required write failed
    pub async fn consume_code(&self, email: &str, candidate: &str) -> DomainResult<VerifyOutcome> {
        let clock = Arc::clone(&self.clock);
        let max_attempts = self.config.max_attempts;
        let key = email.to_string();
        let candidate = candidate.to_string();

        let outcome = self
            .store
            .update(move |snapshot| {
                let now = clock.now();
                let Some(record) = snapshot.get_mut(&key) else {
                    return Commit::Skip(VerifyOutcome::NotFound);
                };

                if record.is_expired_at(now) {
                    snapshot.remove(&key);
                    return Commit::Persist(VerifyOutcome::Expired);
                }

                if record.matches(&candidate) {
                    snapshot.remove(&key);
                    return Commit::Persist(VerifyOutcome::Verified);
                }

                match max_attempts {
                    None => Commit::Skip(VerifyOutcome::Mismatch {
                        remaining_attempts: None,
                    }),
                    Some(limit) => {
                        record.attempts = record.attempts.saturating_add(1);
                        if record.attempts >= limit {
                            snapshot.remove(&key);
                            Commit::Persist(VerifyOutcome::AttemptsExhausted)
                        } else {
                            Commit::Persist(VerifyOutcome::Mismatch {
                                remaining_attempts: Some(limit - record.attempts),
                            })
                        }
                    }
                }
            })
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(email),
                    error = %e,
                    event = "code_verification_error",
                    "Storage error during code verification"
                );
                e
            })?;

        match outcome {
            VerifyOutcome::Verified => tracing::info!(
                email = %mask_email(email),
                event = "code_verified",
                "Verification code successfully verified"
            ),
            VerifyOutcome::NotFound => tracing::debug!(
                email = %mask_email(email),
                event = "code_not_found",
                "No verification code pending"
            ),
            VerifyOutcome::Expired => tracing::info!(
                email = %mask_email(email),
                event = "code_expired",
                "Expired verification code discarded"
            ),
            VerifyOutcome::Mismatch { remaining_attempts } => tracing::warn!(
                email = %mask_email(email),
                remaining_attempts = ?remaining_attempts,
                event = "code_mismatch",
                "Verification code did not match"
            ),
            VerifyOutcome::AttemptsExhausted => tracing::warn!(
                email = %mask_email(email),
                event = "max_attempts_exceeded",
                "Maximum verification attempts exceeded; code discarded"
            ),
        }

        Ok(outcome)
    }

    /// Check if an unexpired code is outstanding for an email
    pub async fn code_exists(&self, email: &str) -> DomainResult<bool> {
        let snapshot = self.store.load().await?;
        let now = self.clock.now();
        Ok(snapshot
            .get(email)
            .map(|record| !record.is_expired_at(now))
            .unwrap_or(false))
    }

    /// Code lifetime in minutes, for delivery messages
    pub fn code_ttl_minutes(&self) -> i64 {
        self.config.code_expiration_minutes
    }
}

impl<S: VerificationStore> std::fmt::Debug for VerificationService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

