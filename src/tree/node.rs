//! File and folder node types for the virtual project tree.

use crate::types::NodeId;
use serde::{Deserialize, Serialize};

/// File node: owns its full text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    pub id: NodeId,
    pub name: String,
    /// Owning folder's id; `None` for a root-level node. A non-owning
    /// back-reference, never used to free anything.
    pub parent_id: Option<NodeId>,
    pub content: String,
}

/// Folder node: owns its children, which form a strict subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderNode {
    pub id: NodeId,
    pub name: String,
    pub parent_id: Option<NodeId>,
    pub children: Vec<Node>,
}

/// A node in the virtual project tree.
///
/// The root list plus every folder's children form a forest: no cycles, no
/// shared ownership, sibling names unique (case-sensitive) within a parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    File(FileNode),
    Folder(FolderNode),
}

impl Node {
    pub fn id(&self) -> &str {
        match self {
            Node::File(f) => &f.id,
            Node::Folder(f) => &f.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::File(f) => &f.name,
            Node::Folder(f) => &f.name,
        }
    }

    pub fn parent_id(&self) -> Option<&str> {
        match self {
            Node::File(f) => f.parent_id.as_deref(),
            Node::Folder(f) => f.parent_id.as_deref(),
        }
    }

    pub fn set_name(&mut self, name: String) {
        match self {
            Node::File(f) => f.name = name,
            Node::Folder(f) => f.name = name,
        }
    }

    pub fn set_parent_id(&mut self, parent_id: Option<NodeId>) {
        match self {
            Node::File(f) => f.parent_id = parent_id,
            Node::Folder(f) => f.parent_id = parent_id,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Node::Folder(_))
    }

    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            Node::File(f) => Some(f),
            Node::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&FolderNode> {
        match self {
            Node::Folder(f) => Some(f),
            Node::File(_) => None,
        }
    }
}

impl FileNode {
    /// Create a file with a fresh id under the given parent.
    pub fn new(name: impl Into<String>, parent_id: Option<NodeId>) -> Self {
        FileNode {
            id: crate::types::fresh_node_id(),
            name: name.into(),
            parent_id,
            content: String::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}

impl FolderNode {
    /// Create an empty folder with a fresh id under the given parent.
    pub fn new(name: impl Into<String>, parent_id: Option<NodeId>) -> Self {
        FolderNode {
            id: crate::types::fresh_node_id(),
            name: name.into(),
            parent_id,
            children: Vec::new(),
        }
    }
}
