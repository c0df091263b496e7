//! Virtual project file tree: node types, structural operations, view state.

pub mod node;
pub mod ops;
pub mod view;

pub use node::{FileNode, FolderNode, Node};
pub use view::ExpansionState;
