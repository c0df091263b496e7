//! Local JSON-file snapshot store, the guest-session analog of the
//! original's browser local storage.

use super::SnapshotStore;
use crate::error::StoreError;
use crate::workspace::Workspace;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stores one pretty-printed JSON file per key under a data directory.
pub struct LocalSnapshotStore {
    dir: PathBuf,
}

impl LocalSnapshotStore {
    /// Store rooted at the platform data directory (e.g.
    /// `~/.local/share/mentor/snapshots`).
    pub fn open_default() -> Result<Self, StoreError> {
        let dirs = directories::ProjectDirs::from("", "mentor", "mentor")
            .ok_or(StoreError::NoDataDir)?;
        Self::open(dirs.data_dir().join("snapshots"))
    }

    /// Store rooted at an explicit directory, created if absent.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(LocalSnapshotStore { dir })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SnapshotStore for LocalSnapshotStore {
    fn load(&self, key: &str) -> Result<Option<Workspace>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)?;
        let snapshot = serde_json::from_str(&text)?;
        debug!(key, path = %path.display(), "loaded snapshot");
        Ok(Some(snapshot))
    }

    fn save(&self, key: &str, snapshot: &Workspace) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let text = serde_json::to_string_pretty(snapshot)?;
        fs::write(&path, text)?;
        debug!(key, path = %path.display(), "saved snapshot");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}
