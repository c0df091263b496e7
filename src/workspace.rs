//! Workspace snapshot and the caller-side glue around the core operations.
//!
//! The workspace owns one snapshot at a time: every structural mutation
//! replaces the tree wholesale, and dependent UI state (open tabs, active
//! file, folder expansion) is reconciled in the same call so a persisted
//! snapshot is always internally consistent.

use crate::curriculum::{normalize, LearningPath};
use crate::error::{RepairError, TreeError};
use crate::tree::node::{FileNode, FolderNode, Node};
use crate::tree::ops;
use crate::tree::view::ExpansionState;
use crate::types::{fresh_path_id, NodeId, PathId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

pub const DEFAULT_FILE_NAME: &str = "untitled.txt";
pub const DEFAULT_FOLDER_NAME: &str = "New Folder";

/// The full persisted state of one user session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Workspace {
    pub project_files: Vec<Node>,
    pub open_file_ids: Vec<NodeId>,
    pub active_file_id: Option<NodeId>,
    pub learning_path: Option<LearningPath>,
    pub custom_learning_paths: Vec<LearningPath>,
    pub points: u64,
    /// View-only expansion state; rebuilt per session, never persisted.
    #[serde(skip)]
    pub expansion: ExpansionState,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh workspace seeded with the three conventional preview files.
    pub fn with_starter_files() -> Self {
        let mut ws = Workspace::new();
        let starters: [(&str, &str); 3] = [
            (
                "index.html",
                "<!DOCTYPE html>\n<html>\n<head>\n  <title>My Project</title>\n</head>\n<body>\n  <h1>Hello!</h1>\n</body>\n</html>\n",
            ),
            ("style.css", "body {\n  font-family: sans-serif;\n}\n"),
            ("script.js", "console.log('ready');\n"),
        ];
        for (name, content) in starters {
            let file = FileNode::new(name, None).with_content(content);
            let id = file.id.clone();
            ws.project_files.push(Node::File(file));
            ws.open_file_ids.push(id);
        }
        ws.active_file_id = ws.open_file_ids.first().cloned();
        ws
    }

    // --- file tree ---

    /// Create a file with a unique default name under `parent_id`, open it,
    /// and make it active. Returns the new node's id.
    pub fn create_file(&mut self, parent_id: Option<&str>) -> Result<NodeId, TreeError> {
        let name = ops::unique_name(&self.project_files, DEFAULT_FILE_NAME, false, parent_id);
        let file = FileNode::new(name, None);
        let id = file.id.clone();
        self.project_files = ops::add_node(self.project_files.clone(), parent_id, Node::File(file))?;
        if let Some(pid) = parent_id {
            self.expansion.reveal(pid);
        }
        self.open_file(&id);
        Ok(id)
    }

    /// Create a folder with a unique default name under `parent_id`.
    pub fn create_folder(&mut self, parent_id: Option<&str>) -> Result<NodeId, TreeError> {
        let name = ops::unique_name(&self.project_files, DEFAULT_FOLDER_NAME, true, parent_id);
        let folder = FolderNode::new(name, None);
        let id = folder.id.clone();
        self.project_files = ops::add_node(self.project_files.clone(), parent_id, Node::Folder(folder))?;
        if let Some(pid) = parent_id {
            self.expansion.reveal(pid);
        }
        Ok(id)
    }

    pub fn rename_node(&mut self, id: &str, new_name: &str) -> Result<(), TreeError> {
        self.project_files = ops::rename_node(self.project_files.clone(), id, new_name)?;
        Ok(())
    }

    /// Delete a node and purge every dependent pointer into its subtree.
    ///
    /// Deleting a node that no longer exists is logged and ignored.
    pub fn delete_node(&mut self, id: &str) {
        match ops::delete_node(self.project_files.clone(), id) {
            Ok((tree, deleted_file_ids)) => {
                self.project_files = tree;
                self.open_file_ids
                    .retain(|fid| !deleted_file_ids.contains(fid));
                if let Some(active) = &self.active_file_id {
                    if deleted_file_ids.contains(active) {
                        self.active_file_id = self.open_file_ids.first().cloned();
                    }
                }
                self.expansion.prune(&self.project_files);
            }
            Err(err) => warn!(%err, "delete ignored"),
        }
    }

    pub fn move_node(
        &mut self,
        dragged_id: &str,
        target_folder_id: Option<&str>,
    ) -> Result<(), TreeError> {
        match ops::move_node(self.project_files.clone(), dragged_id, target_folder_id) {
            Ok(tree) => {
                self.project_files = tree;
                if let Some(tid) = target_folder_id {
                    self.expansion.reveal(tid);
                }
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    pub fn toggle_folder(&mut self, id: &str) {
        self.expansion.toggle(id);
    }

    /// Add a file to the open-tab list (idempotent) and make it active.
    pub fn open_file(&mut self, id: &str) {
        if !self.open_file_ids.iter().any(|fid| fid == id) {
            self.open_file_ids.push(id.to_string());
        }
        self.active_file_id = Some(id.to_string());
    }

    /// Close a tab; the active pointer falls back to the last remaining tab.
    pub fn close_file(&mut self, id: &str) {
        self.open_file_ids.retain(|fid| fid != id);
        if self.active_file_id.as_deref() == Some(id) {
            self.active_file_id = self.open_file_ids.last().cloned();
        }
    }

    pub fn set_file_content(&mut self, id: &str, content: &str) -> Result<(), TreeError> {
        fn update(nodes: &mut [Node], id: &str, content: &str) -> bool {
            for node in nodes.iter_mut() {
                match node {
                    Node::File(file) if file.id == id => {
                        file.content = content.to_string();
                        return true;
                    }
                    Node::Folder(folder) => {
                        if update(&mut folder.children, id, content) {
                            return true;
                        }
                    }
                    _ => {}
                }
            }
            false
        }
        if update(&mut self.project_files, id, content) {
            Ok(())
        } else {
            Err(TreeError::NodeNotFound(id.to_string()))
        }
    }

    // --- learning paths ---

    /// Run AI-produced JSON through the repair pipeline, stamp a fresh id,
    /// store it among the custom paths, and select it.
    pub fn adopt_custom_path(&mut self, candidate: &Value) -> Result<PathId, RepairError> {
        let mut path = normalize::normalize(candidate)?;
        path.id = fresh_path_id();
        let id = path.id.clone();
        self.custom_learning_paths.push(path.clone());
        self.learning_path = Some(path);
        debug!(path_id = %id, "adopted custom learning path");
        Ok(id)
    }

    /// Select a path by id from custom paths or the standard catalog.
    /// Unknown ids are logged and leave the selection unchanged.
    pub fn select_path(&mut self, id: &str) -> bool {
        match normalize::find_path_by_id(id, &self.custom_learning_paths) {
            Some(path) => {
                self.learning_path = Some(path);
                true
            }
            None => {
                warn!(path_id = id, "unknown learning path");
                false
            }
        }
    }

    /// Mark a lesson or step complete on the selected path, banking points.
    pub fn complete_item(&mut self, item_id: &str) -> u64 {
        let Some(path) = self.learning_path.as_mut() else {
            return 0;
        };
        let earned = crate::curriculum::progress::set_completed(path, item_id);
        self.points += earned;
        if earned > 0 {
            self.sync_custom_path();
        }
        earned
    }

    pub fn set_item_priority(
        &mut self,
        item_id: &str,
        priority: crate::curriculum::Priority,
    ) -> bool {
        let Some(path) = self.learning_path.as_mut() else {
            return false;
        };
        let changed = crate::curriculum::progress::set_priority(path, item_id, priority);
        if changed {
            self.sync_custom_path();
        }
        changed
    }

    pub fn reset_path_progress(&mut self) {
        if let Some(path) = self.learning_path.as_mut() {
            crate::curriculum::progress::reset_progress(path);
            self.sync_custom_path();
        }
    }

    // Progress on a selected custom path must survive re-selection, so the
    // stored copy tracks the live one. Standard paths are per-session copies.
    fn sync_custom_path(&mut self) {
        if let Some(path) = &self.learning_path {
            if let Some(stored) = self
                .custom_learning_paths
                .iter_mut()
                .find(|p| p.id == path.id)
            {
                *stored = path.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn second_default_file_gets_counter_before_extension() {
        let mut ws = Workspace::new();
        let first = ws.create_file(None).unwrap();
        let second = ws.create_file(None).unwrap();
        let first_name = ops::find_node(&ws.project_files, &first)
            .unwrap()
            .name()
            .to_string();
        let second_name = ops::find_node(&ws.project_files, &second)
            .unwrap()
            .name()
            .to_string();
        assert_eq!(first_name, "untitled.txt");
        assert_eq!(second_name, "untitled 1.txt");
        assert_eq!(ws.active_file_id.as_deref(), Some(second.as_str()));
        assert_eq!(ws.open_file_ids.len(), 2);
    }

    #[test]
    fn create_in_folder_reveals_it() {
        let mut ws = Workspace::new();
        let folder = ws.create_folder(None).unwrap();
        assert!(!ws.expansion.is_open(&folder));
        ws.create_file(Some(&folder)).unwrap();
        assert!(ws.expansion.is_open(&folder));
    }

    #[test]
    fn delete_purges_tabs_and_active_pointer() {
        let mut ws = Workspace::new();
        let folder = ws.create_folder(None).unwrap();
        let inner = ws.create_file(Some(&folder)).unwrap();
        let outer = ws.create_file(None).unwrap();
        ws.open_file(&inner);
        assert_eq!(ws.active_file_id.as_deref(), Some(inner.as_str()));
        ws.delete_node(&folder);
        assert!(ops::find_node(&ws.project_files, &inner).is_none());
        assert!(!ws.open_file_ids.contains(&inner));
        assert_eq!(ws.active_file_id.as_deref(), Some(outer.as_str()));
    }

    #[test]
    fn delete_of_missing_node_is_ignored() {
        let mut ws = Workspace::with_starter_files();
        let before = ws.project_files.clone();
        ws.delete_node("ghost");
        assert_eq!(ws.project_files, before);
    }

    #[test]
    fn close_file_falls_back_to_last_tab() {
        let mut ws = Workspace::new();
        let a = ws.create_file(None).unwrap();
        let b = ws.create_file(None).unwrap();
        ws.close_file(&b);
        assert_eq!(ws.active_file_id.as_deref(), Some(a.as_str()));
        ws.close_file(&a);
        assert!(ws.active_file_id.is_none());
    }

    #[test]
    fn adopt_custom_path_assigns_fresh_id_and_selects() {
        let mut ws = Workspace::new();
        let candidate = json!({"title": "Mine", "modules": [{"title": "M"}]});
        let id = ws.adopt_custom_path(&candidate).unwrap();
        assert_eq!(ws.learning_path.as_ref().unwrap().id, id);
        assert_eq!(ws.custom_learning_paths.len(), 1);
        assert!(ws.adopt_custom_path(&json!({})).is_err());
    }

    #[test]
    fn completing_items_banks_points_and_syncs_custom_copy() {
        let mut ws = Workspace::new();
        let candidate = json!({
            "title": "Mine",
            "modules": [{"title": "M", "lessons": [{"id": "l1", "title": "L", "prompt": "p"}]}]
        });
        let id = ws.adopt_custom_path(&candidate).unwrap();
        assert_eq!(ws.complete_item("l1"), 10);
        assert_eq!(ws.complete_item("l1"), 0);
        assert_eq!(ws.points, 10);
        // progress survives re-selection
        assert!(ws.select_path(&id));
        assert!(ws
            .learning_path
            .as_ref()
            .unwrap()
            .find_item("l1")
            .unwrap()
            .completed);
    }

    #[test]
    fn snapshot_round_trips_without_view_state() {
        let mut ws = Workspace::with_starter_files();
        let folder = ws.create_folder(None).unwrap();
        ws.toggle_folder(&folder);
        let json = serde_json::to_string(&ws).unwrap();
        assert!(!json.contains("expansion"));
        let restored: Workspace = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.project_files, ws.project_files);
        assert!(!restored.expansion.is_open(&folder));
    }
}
