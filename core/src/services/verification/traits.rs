//! Traits for snapshot storage and code delivery

use async_trait::async_trait;

use crate::domain::entities::verification_record::VerificationSnapshot;
use crate::errors::DomainResult;

/// Decision returned by a read-modify-write closure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit<R> {
    /// Write the mutated snapshot back, then return the value
    Persist(R),
    /// Leave the durable snapshot untouched and return the value
    Skip(R),
}

impl<R> Commit<R> {
    /// Whether the snapshot must be written back
    pub fn is_persist(&self) -> bool {
        matches!(self, Commit::Persist(_))
    }

    /// The value carried by either branch
    pub fn into_inner(self) -> R {
        match self {
            Commit::Persist(value) | Commit::Skip(value) => value,
        }
    }
}

/// Durable mapping email -> outstanding verification record
///
/// Implementations own every access to the underlying medium. Writes always
/// replace the whole snapshot and must never be observable half-done.
#[async_trait]
pub trait VerificationStore: Send + Sync {
    /// Read the current snapshot under a shared lock.
    ///
    /// A missing or unreadable snapshot yields an empty mapping.
    async fn load(&self) -> DomainResult<VerificationSnapshot>;

    /// Replace the whole snapshot under an exclusive lock
    async fn save(&self, snapshot: VerificationSnapshot) -> DomainResult<()>;

    /// Run one read-modify-write cycle under a single exclusive lock.
    ///
    /// The lock spans the read, the closure and the write, so concurrent
    /// cycles never interleave. The snapshot is written back only when the
    /// closure returns `Commit::Persist`.
    async fn update<F, R>(&self, mutate: F) -> DomainResult<R>
    where
        F: FnOnce(&mut VerificationSnapshot) -> Commit<R> + Send + 'static,
        R: Send + 'static;
}

/// Out-of-band delivery of verification codes (email, SMS, ...)
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Deliver a message to a recipient
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Provider identifier for the sent message
    /// * `Err(DomainError::Backend)` - If delivery fails
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> DomainResult<String>;
}
