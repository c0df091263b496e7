//! Core identifier types for the tutor state management system.

use std::sync::atomic::{AtomicU64, Ordering};

/// NodeId: Opaque identifier of a file or folder in the virtual tree
pub type NodeId = String;

/// PathId: Identifier of a learning path
pub type PathId = String;

/// ItemId: Identifier of a lesson or guided-project step
pub type ItemId = String;

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Mint a fresh identifier with the given prefix.
///
/// Ids are timestamp-derived with a process-local counter suffix: unique
/// enough for snapshot-scoped identity, not cryptographic and not globally
/// ordered.
pub fn fresh_id(prefix: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let seq = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}-{}", prefix, millis, seq)
}

/// Mint a node id for the virtual file tree.
pub fn fresh_node_id() -> NodeId {
    fresh_id("node")
}

/// Mint a learning-path id.
pub fn fresh_path_id() -> PathId {
    fresh_id("path")
}

/// Mint a lesson/step id.
pub fn fresh_item_id() -> ItemId {
    fresh_id("item")
}
