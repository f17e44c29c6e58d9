//! Durable storage configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Location of the verification snapshot
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the JSON snapshot holding outstanding codes
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("config/verification_codes.json"),
        }
    }
}

impl StorageConfig {
    /// Create a storage configuration for a snapshot path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sidecar file used for cross-process locking.
    ///
    /// The snapshot itself is replaced by rename on every write, so the lock
    /// must live on a file whose identity never changes.
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }
}
