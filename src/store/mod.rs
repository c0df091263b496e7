//! Snapshot persistence.
//!
//! The core never talks to storage directly: callers hand a finished
//! [`Workspace`] snapshot to a `SnapshotStore` and decide when to persist.
//! Signed-in users go through a cloud implementation outside this crate;
//! guests use the local JSON store under a fixed key.

pub mod local;

use crate::error::StoreError;
use crate::workspace::Workspace;

/// Fixed key under which a guest session is persisted.
pub const GUEST_KEY: &str = "guest-session";

/// Snapshot store interface.
pub trait SnapshotStore {
    fn load(&self, key: &str) -> Result<Option<Workspace>, StoreError>;
    fn save(&self, key: &str, snapshot: &Workspace) -> Result<(), StoreError>;
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}
