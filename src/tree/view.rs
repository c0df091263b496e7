//! Transient expand/collapse state for the file-tree view.
//!
//! Kept outside the persisted tree so serialization and structural equality
//! never depend on what the user happened to have unfolded.

use crate::tree::node::Node;
use crate::tree::ops::find_node;
use crate::types::NodeId;
use std::collections::HashSet;

/// Set of folder ids currently expanded in the view. Folders default to
/// collapsed.
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    open: HashSet<NodeId>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.contains(id)
    }

    /// Idempotent toggle, independent of the structural tree.
    pub fn toggle(&mut self, id: &str) {
        if !self.open.remove(id) {
            self.open.insert(id.to_string());
        }
    }

    /// Expand a folder so freshly inserted children become visible.
    pub fn reveal(&mut self, id: &str) {
        self.open.insert(id.to_string());
    }

    /// Drop entries whose folder no longer exists in the tree.
    pub fn prune(&mut self, tree: &[Node]) {
        self.open.retain(|id| find_node(tree, id).is_some());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::FolderNode;

    #[test]
    fn toggle_and_reveal() {
        let mut state = ExpansionState::new();
        assert!(!state.is_open("d1"));
        state.toggle("d1");
        assert!(state.is_open("d1"));
        state.toggle("d1");
        assert!(!state.is_open("d1"));
        state.reveal("d1");
        state.reveal("d1");
        assert!(state.is_open("d1"));
    }

    #[test]
    fn prune_drops_dead_ids() {
        let mut state = ExpansionState::new();
        state.reveal("gone");
        let tree = vec![Node::Folder(FolderNode::new("src", None))];
        state.prune(&tree);
        assert!(!state.is_open("gone"));
    }
}
