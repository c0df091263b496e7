//! Error types for tree mutation, path repair, and snapshot storage.

use thiserror::Error;

/// Structural errors from virtual file-tree operations.
///
/// Every operation that can fail returns the original snapshot untouched;
/// there is no partial mutation to recover from.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("node '{0}' not found in tree")]
    NodeNotFound(String),

    #[error("parent folder '{0}' not found in tree")]
    ParentNotFound(String),

    #[error("node '{0}' is a file, not a folder")]
    NotAFolder(String),

    #[error("cannot move folder '{dragged}' into itself or its descendant '{target}'")]
    CyclicMove { dragged: String, target: String },

    #[error("tree integrity violation: {0}")]
    IntegrityViolation(String),
}

/// Top-level shape failures from the learning-path repair pipeline.
///
/// Per-module malformation never produces an error; only a candidate with
/// no usable identity or no modules array is beyond repair.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepairError {
    #[error("candidate is not a JSON object")]
    NotAnObject,

    #[error("candidate has neither a usable id nor a title")]
    MissingIdentity,

    #[error("candidate 'modules' is missing or not an array")]
    ModulesNotAList,
}

/// Snapshot persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("could not resolve platform data directory")]
    NoDataDir,
}

/// Umbrella error for CLI and API surfaces.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("repair error: {0}")]
    Repair(#[from] RepairError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
