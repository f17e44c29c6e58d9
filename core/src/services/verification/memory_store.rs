//! In-process verification store

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::entities::verification_record::VerificationSnapshot;
use crate::errors::DomainResult;

use super::traits::{Commit, VerificationStore};

/// Verification store held in memory.
///
/// A single async mutex serializes every cycle, which gives the same
/// read-modify-write guarantees as the file-backed store within one process.
/// State is lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct MemoryVerificationStore {
    snapshot: Arc<Mutex<VerificationSnapshot>>,
}

impl MemoryVerificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot
    pub fn with_snapshot(snapshot: VerificationSnapshot) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(snapshot)),
        }
    }
}

#[async_trait]
impl VerificationStore for MemoryVerificationStore {
    async fn load(&self) -> DomainResult<VerificationSnapshot> {
        Ok(self.snapshot.lock().await.clone())
    }

    async fn save(&self, snapshot: VerificationSnapshot) -> DomainResult<()> {
        *self.snapshot.lock().await = snapshot;
        Ok(())
    }

    async fn update<F, R>(&self, mutate: F) -> DomainResult<R>
    where
        F: FnOnce(&mut VerificationSnapshot) -> Commit<R> + Send + 'static,
        R: Send + 'static,
    {
        let mut guard = self.snapshot.lock().await;
        // Mutate a working copy so a skipped cycle leaves the state untouched
        let mut working = guard.clone();
        let commit = mutate(&mut working);
        if commit.is_persist() {
            *guard = working;
        }
        Ok(commit.into_inner())
    }
}
