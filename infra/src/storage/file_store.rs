//! File-backed verification code store
//!
//! The snapshot is a single JSON object mapping email to
//! `{"code": "...", "expires": "<RFC 3339>"}`. Every operation takes a lock on
//! a sidecar `<path>.lock` file, so independent handles, in this process or
//! another, never interleave their read-modify-write cycles:
//!
//! - `load` holds a shared lock while reading
//! - `save` and `update` hold an exclusive lock from read through rename
//!
//! Writes go to a temporary file in the same directory which is fsynced and
//! renamed over the snapshot; readers see either the old or the new content.

use async_trait::async_trait;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use ag_core::domain::entities::verification_record::VerificationSnapshot;
use ag_core::errors::{DomainError, DomainResult};
use ag_core::services::verification::{Commit, VerificationStore};
use ag_shared::config::StorageConfig;

use crate::InfrastructureError;

#[derive(Debug)]
struct SnapshotPaths {
    data: PathBuf,
    lock: PathBuf,
}

impl SnapshotPaths {
    fn directory(&self) -> &Path {
        match self.data.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn open_lock_file(&self) -> Result<File, InfrastructureError> {
        fs::create_dir_all(self.directory())?;
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.lock)?;
        Ok(file)
    }

    /// Released when the returned handle is dropped
    fn lock_shared(&self) -> Result<File, InfrastructureError> {
        let file = self.open_lock_file()?;
        FileExt::lock_shared(&file)?;
        Ok(file)
    }

    fn lock_exclusive(&self) -> Result<File, InfrastructureError> {
        let file = self.open_lock_file()?;
        FileExt::lock_exclusive(&file)?;
        Ok(file)
    }

    /// Read the snapshot; a missing or unparseable file reads as empty
    fn read(&self) -> VerificationSnapshot {
        let content = match fs::read_to_string(&self.data) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return VerificationSnapshot::new(),
            Err(e) => {
                warn!(
                    path = %self.data.display(),
                    error = %e,
                    event = "snapshot_unreadable",
                    "Verification snapshot unreadable; treating as empty"
                );
                return VerificationSnapshot::new();
            }
        };

        if content.trim().is_empty() {
            return VerificationSnapshot::new();
        }

        match serde_json::from_str(&content) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(
                    path = %self.data.display(),
                    error = %e,
                    event = "snapshot_corrupt",
                    "Verification snapshot is not valid JSON; treating as empty"
                );
                VerificationSnapshot::new()
            }
        }
    }

    /// Replace the snapshot atomically. Caller must hold the exclusive lock.
    fn write(&self, snapshot: &VerificationSnapshot) -> Result<(), InfrastructureError> {
        let dir = self.directory();
        fs::create_dir_all(dir)?;

        let mut temp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut temp, snapshot)?;
        temp.write_all(b"\n")?;
        temp.as_file().sync_all()?;
        temp.persist(&self.data).map_err(|e| InfrastructureError::Io(e.error))?;

        // The new content is already in place; a failed directory sync only
        // leaves the rename at risk across a crash
        if let Err(e) = sync_directory(dir) {
            warn!(
                path = %dir.display(),
                error = %e,
                event = "snapshot_dir_sync_failed",
                "Could not fsync snapshot directory after rename"
            );
        }

        debug!(
            path = %self.data.display(),
            entries = snapshot.len(),
            event = "snapshot_written",
            "Verification snapshot written"
        );
        Ok(())
    }
}

/// Flush directory metadata so a completed rename survives a crash
#[cfg(unix)]
fn sync_directory(dir: &Path) -> std::io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_directory(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Verification store persisting a JSON snapshot on the local filesystem
///
/// Cloning is cheap and clones share the same paths; separate instances built
/// for the same path coordinate through the lock file.
#[derive(Debug, Clone)]
pub struct FileVerificationStore {
    paths: Arc<SnapshotPaths>,
}

impl FileVerificationStore {
    /// Create a store for a snapshot path
    ///
    /// Nothing is touched on disk until the first operation; the parent
    /// directory is created on demand.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::from_config(&StorageConfig::new(path))
    }

    /// Create a store from storage configuration
    pub fn from_config(config: &StorageConfig) -> Self {
        Self {
            paths: Arc::new(SnapshotPaths {
                data: config.path.clone(),
                lock: config.lock_path(),
            }),
        }
    }

    /// Path of the JSON snapshot
    pub fn path(&self) -> &Path {
        &self.paths.data
    }

    async fn run_blocking<T, F>(&self, task: F) -> DomainResult<T>
    where
        F: FnOnce(&SnapshotPaths) -> Result<T, InfrastructureError> + Send + 'static,
        T: Send + 'static,
    {
        let paths = Arc::clone(&self.paths);
        tokio::task::spawn_blocking(move || task(&paths))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Storage task failed: {}", e),
            })?
            .map_err(|e| {
                warn!(error = %e, event = "snapshot_io_failed", "Verification snapshot I/O failed");
                DomainError::from(e)
            })
    }
}

#[async_trait]
impl VerificationStore for FileVerificationStore {
    async fn load(&self) -> DomainResult<VerificationSnapshot> {
        self.run_blocking(|paths| {
            let _guard = paths.lock_shared()?;
            Ok(paths.read())
        })
        .await
    }

    async fn save(&self, snapshot: VerificationSnapshot) -> DomainResult<()> {
        self.run_blocking(move |paths| {
            let _guard = paths.lock_exclusive()?;
            paths.write(&snapshot)
        })
        .await
    }

    async fn update<F, R>(&self, mutate: F) -> DomainResult<R>
    where
        F: FnOnce(&mut VerificationSnapshot) -> Commit<R> + Send + 'static,
        R: Send + 'static,
    {
        self.run_blocking(move |paths| {
            let _guard = paths.lock_exclusive()?;
            let mut snapshot = paths.read();
            match mutate(&mut snapshot) {
                Commit::Persist(value) => {
                    paths.write(&snapshot)?;
                    Ok(value)
                }
                Commit::Skip(value) => Ok(value),
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ag_core::domain::entities::verification_record::VerificationRecord;
    use chrono::{DateTime, Duration};
    use tempfile::TempDir;

    fn record(code: &str) -> VerificationRecord {
        let now = DateTime::parse_from_rfc3339("2026-10-19T10:00:00-05:00").unwrap();
        VerificationRecord::issue(code, now, Duration::minutes(10))
    }

    fn store_in(dir: &TempDir) -> FileVerificationStore {
        FileVerificationStore::new(dir.path().join("verification_codes.json"))
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.load().await.unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_save_writes_documented_format() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut snapshot = VerificationSnapshot::new();
        snapshot.insert("a@x.com".to_string(), record("418290"));
        store.save(snapshot).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["a@x.com"]["code"], "418290");
        assert_eq!(raw["a@x.com"]["expires"], "2026-10-19T10:10:00-05:00");
        assert!(raw["a@x.com"].get("attempts").is_none());
    }

    #[tokio::test]
    async fn test_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let store = FileVerificationStore::new(dir.path().join("nested/config/codes.json"));

        store
            .update(|snapshot| {
                snapshot.insert("a@x.com".to_string(), record("123456"));
                Commit::Persist(())
            })
            .await
            .unwrap();

        assert!(store.path().exists());
        assert_eq!(store.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_skip_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let outcome = store
            .update(|snapshot| {
                snapshot.insert("a@x.com".to_string(), record("123456"));
                Commit::Skip("skipped")
            })
            .await
            .unwrap();

        assert_eq!(outcome, "skipped");
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_reads_empty_and_is_repaired() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ not json").unwrap();

        assert!(store.load().await.unwrap().is_empty());

        store
            .update(|snapshot| {
                snapshot.insert("a@x.com".to_string(), record("654321"));
                Commit::Persist(())
            })
            .await
            .unwrap();

        let repaired = store.load().await.unwrap();
        assert_eq!(repaired["a@x.com"].code, "654321");
    }

    #[test]
    fn test_sync_directory() {
        let dir = TempDir::new().unwrap();
        assert!(sync_directory(dir.path()).is_ok());

        #[cfg(unix)]
        assert!(sync_directory(&dir.path().join("missing")).is_err());
    }

    #[tokio::test]
    async fn test_accepts_legacy_records() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"{"ana@x.com": {"code": "000123", "expires": "2026-10-19T10:10:00.123456-05:00"}}"#,
        )
        .unwrap();

        let snapshot = store.load().await.unwrap();
        assert_eq!(snapshot["ana@x.com"].code, "000123");
        assert_eq!(snapshot["ana@x.com"].attempts, 0);
    }
}
