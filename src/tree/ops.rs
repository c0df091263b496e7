//! Structural operations over the virtual project tree.
//!
//! Every operation takes a snapshot and returns a new one; on error the
//! caller keeps the original snapshot, so there is never a partial mutation.

use crate::error::TreeError;
use crate::tree::node::{FolderNode, Node};
use crate::types::NodeId;
use std::collections::HashSet;
use tracing::warn;

/// Depth-first lookup of a node and its immediate owning folder.
///
/// The parent is `None` when the node sits at the root level.
pub fn find_node_and_parent<'a>(
    tree: &'a [Node],
    id: &str,
) -> Option<(&'a Node, Option<&'a FolderNode>)> {
    fn walk<'a>(
        nodes: &'a [Node],
        parent: Option<&'a FolderNode>,
        id: &str,
    ) -> Option<(&'a Node, Option<&'a FolderNode>)> {
        for node in nodes {
            if node.id() == id {
                return Some((node, parent));
            }
            if let Node::Folder(folder) = node {
                if let Some(found) = walk(&folder.children, Some(folder), id) {
                    return Some(found);
                }
            }
        }
        None
    }
    walk(tree, None, id)
}

/// Lookup a node by id anywhere in the tree.
pub fn find_node<'a>(tree: &'a [Node], id: &str) -> Option<&'a Node> {
    find_node_and_parent(tree, id).map(|(node, _)| node)
}

fn sibling_names(tree: &[Node], parent_id: Option<&str>) -> Vec<String> {
    let siblings: &[Node] = match parent_id {
        None => tree,
        Some(pid) => match find_node(tree, pid).and_then(Node::as_folder) {
            Some(folder) => &folder.children,
            None => return Vec::new(),
        },
    };
    siblings.iter().map(|n| n.name().to_string()).collect()
}

/// Split a file name into stem and extension at the last `.`.
///
/// Names without a dot (or with a leading dot only) have no extension.
fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], Some(&name[idx + 1..])),
        _ => (name, None),
    }
}

/// Compute a name unique among the siblings of `parent_id` (the root list
/// when `None`).
///
/// Collisions get a counter suffix ` 1`, ` 2`, … placed before the file
/// extension; folder names never carry an extension. Idempotent until the
/// sibling set changes.
pub fn unique_name(tree: &[Node], base: &str, is_folder: bool, parent_id: Option<&str>) -> String {
    let taken: HashSet<String> = sibling_names(tree, parent_id).into_iter().collect();
    if !taken.contains(base) {
        return base.to_string();
    }
    let (stem, ext) = if is_folder {
        (base, None)
    } else {
        split_extension(base)
    };
    let mut counter = 1u32;
    loop {
        let candidate = match ext {
            Some(ext) => format!("{} {}.{}", stem, counter, ext),
            None => format!("{} {}", stem, counter),
        };
        if !taken.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Insert a node under `parent_id` (the root list when `None`).
///
/// The node's `parent_id` back-reference is rewritten to match its new
/// placement. A missing parent or a file parent is an explicit error, never
/// a silent no-op.
pub fn add_node(
    tree: Vec<Node>,
    parent_id: Option<&str>,
    mut node: Node,
) -> Result<Vec<Node>, TreeError> {
    node.set_parent_id(parent_id.map(str::to_string));
    let Some(pid) = parent_id else {
        let mut tree = tree;
        tree.push(node);
        return Ok(tree);
    };

    match find_node(&tree, pid) {
        None => {
            warn!(parent_id = pid, "insertion target does not exist");
            return Err(TreeError::ParentNotFound(pid.to_string()));
        }
        Some(n) if !n.is_folder() => {
            warn!(parent_id = pid, "insertion target is a file");
            return Err(TreeError::NotAFolder(pid.to_string()));
        }
        Some(_) => {}
    }

    // Hands the node back out if no folder with `pid` was found on this level
    // or below.
    fn insert(nodes: &mut [Node], pid: &str, mut node: Option<Node>) -> Option<Node> {
        for existing in nodes.iter_mut() {
            let Some(pending) = node.take() else {
                return None;
            };
            if let Node::Folder(folder) = existing {
                if folder.id == pid {
                    folder.children.push(pending);
                    return None;
                }
                node = insert(&mut folder.children, pid, Some(pending));
            } else {
                node = Some(pending);
            }
        }
        node
    }

    let mut tree = tree;
    if insert(&mut tree, pid, Some(node)).is_some() {
        // Unreachable: the parent was resolved above on the same snapshot.
        return Err(TreeError::ParentNotFound(pid.to_string()));
    }
    Ok(tree)
}

/// Rename a node in place.
///
/// Sibling uniqueness is deliberately not enforced here; callers that want
/// strictness pre-check with [`unique_name`].
pub fn rename_node(tree: Vec<Node>, id: &str, new_name: &str) -> Result<Vec<Node>, TreeError> {
    fn rename(nodes: &mut [Node], id: &str, new_name: &str) -> bool {
        for node in nodes.iter_mut() {
            if node.id() == id {
                node.set_name(new_name.to_string());
                return true;
            }
            if let Node::Folder(folder) = node {
                if rename(&mut folder.children, id, new_name) {
                    return true;
                }
            }
        }
        false
    }
    let mut tree = tree;
    if rename(&mut tree, id, new_name) {
        Ok(tree)
    } else {
        Err(TreeError::NodeNotFound(id.to_string()))
    }
}

/// Collect the ids of every file in the subtree rooted at `node`, including
/// `node` itself when it is a file.
pub fn collect_file_ids(node: &Node, out: &mut Vec<NodeId>) {
    match node {
        Node::File(file) => out.push(file.id.clone()),
        Node::Folder(folder) => {
            for child in &folder.children {
                collect_file_ids(child, out);
            }
        }
    }
}

/// Remove a node (and, for folders, its entire subtree).
///
/// Returns the new tree plus the ids of every deleted file so the caller can
/// purge open-tab and active-file state pointing into the removed subtree.
pub fn delete_node(tree: Vec<Node>, id: &str) -> Result<(Vec<Node>, Vec<NodeId>), TreeError> {
    let (tree, removed) = detach_node(tree, id)?;
    let mut deleted_file_ids = Vec::new();
    collect_file_ids(&removed, &mut deleted_file_ids);
    Ok((tree, deleted_file_ids))
}

/// Whether `ancestor_id` appears on the ancestor chain of `id` (inclusive of
/// `id` itself), walked upward via `parent_id` lookups.
fn on_ancestor_chain(tree: &[Node], id: &str, ancestor_id: &str) -> bool {
    let mut current = Some(id.to_string());
    while let Some(cur) = current {
        if cur == ancestor_id {
            return true;
        }
        current = find_node(tree, &cur)
            .and_then(|n| n.parent_id())
            .map(str::to_string);
    }
    false
}

/// Move a node into another folder (or to the root when `target_folder_id`
/// is `None`).
///
/// Guards, evaluated before any mutation:
/// 1. moving into the current parent is an unchanged no-op;
/// 2. a folder may not be moved into itself or any of its descendants;
/// 3. the target must resolve to an existing folder.
///
/// The moved node is renamed against its new sibling set (computed with the
/// node already detached, so it cannot collide with itself), then inserted.
pub fn move_node(
    tree: Vec<Node>,
    dragged_id: &str,
    target_folder_id: Option<&str>,
) -> Result<Vec<Node>, TreeError> {
    let (dragged, parent) = find_node_and_parent(&tree, dragged_id)
        .ok_or_else(|| TreeError::NodeNotFound(dragged_id.to_string()))?;

    let current_parent = parent.map(|f| f.id.as_str());
    if current_parent == target_folder_id {
        return Ok(tree);
    }

    if let Some(tid) = target_folder_id {
        match find_node(&tree, tid) {
            None => {
                warn!(target = tid, "move target does not exist");
                return Err(TreeError::ParentNotFound(tid.to_string()));
            }
            Some(n) if !n.is_folder() => {
                warn!(target = tid, "move target is a file");
                return Err(TreeError::NotAFolder(tid.to_string()));
            }
            Some(_) => {}
        }
        if dragged.is_folder() && on_ancestor_chain(&tree, tid, dragged_id) {
            warn!(
                dragged = dragged_id,
                target = tid,
                "rejected move that would create a cycle"
            );
            return Err(TreeError::CyclicMove {
                dragged: dragged_id.to_string(),
                target: tid.to_string(),
            });
        }
    }

    let (tree, mut detached) = detach_node(tree, dragged_id)?;
    let new_name = unique_name(&tree, detached.name(), detached.is_folder(), target_folder_id);
    detached.set_name(new_name);
    add_node(tree, target_folder_id, detached)
}

/// Remove a node from the tree and hand it back intact.
fn detach_node(tree: Vec<Node>, id: &str) -> Result<(Vec<Node>, Node), TreeError> {
    fn remove(nodes: Vec<Node>, id: &str, removed: &mut Option<Node>) -> Vec<Node> {
        let mut kept = Vec::with_capacity(nodes.len());
        for node in nodes {
            if node.id() == id {
                *removed = Some(node);
                continue;
            }
            match node {
                Node::Folder(mut folder) => {
                    folder.children = remove(folder.children, id, removed);
                    kept.push(Node::Folder(folder));
                }
                file => kept.push(file),
            }
        }
        kept
    }
    let mut removed = None;
    let tree = remove(tree, id, &mut removed);
    match removed {
        Some(node) => Ok((tree, node)),
        None => Err(TreeError::NodeNotFound(id.to_string())),
    }
}

/// Check the structural invariants: unique ids across the forest, and every
/// node's `parent_id` back-reference matching its actual placement.
pub fn verify_integrity(tree: &[Node]) -> Result<(), TreeError> {
    fn walk(
        nodes: &[Node],
        expected_parent: Option<&str>,
        seen: &mut HashSet<String>,
    ) -> Result<(), TreeError> {
        for node in nodes {
            if !seen.insert(node.id().to_string()) {
                return Err(TreeError::IntegrityViolation(format!(
                    "duplicate node id '{}'",
                    node.id()
                )));
            }
            if node.parent_id() != expected_parent {
                return Err(TreeError::IntegrityViolation(format!(
                    "node '{}' has parent_id {:?}, expected {:?}",
                    node.id(),
                    node.parent_id(),
                    expected_parent
                )));
            }
            if let Node::Folder(folder) = node {
                walk(&folder.children, Some(&folder.id), seen)?;
            }
        }
        Ok(())
    }
    walk(tree, None, &mut HashSet::new())
}

/// Sibling name collisions anywhere in the forest, as `parent/name` labels.
///
/// Rename is lenient by design, so duplicates are reported rather than
/// rejected.
pub fn duplicate_sibling_names(tree: &[Node]) -> Vec<String> {
    fn walk(nodes: &[Node], parent_label: &str, out: &mut Vec<String>) {
        let mut seen = HashSet::new();
        for node in nodes {
            if !seen.insert(node.name().to_string()) {
                out.push(format!("{}/{}", parent_label, node.name()));
            }
            if let Node::Folder(folder) = node {
                walk(&folder.children, folder.name.as_str(), out);
            }
        }
    }
    let mut out = Vec::new();
    walk(tree, "", &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::{FileNode, FolderNode};

    fn file(id: &str, name: &str, parent: Option<&str>) -> Node {
        Node::File(FileNode {
            id: id.to_string(),
            name: name.to_string(),
            parent_id: parent.map(str::to_string),
            content: String::new(),
        })
    }

    fn folder(id: &str, name: &str, parent: Option<&str>, children: Vec<Node>) -> Node {
        Node::Folder(FolderNode {
            id: id.to_string(),
            name: name.to_string(),
            parent_id: parent.map(str::to_string),
            children,
        })
    }

    #[test]
    fn find_locates_nested_node_with_parent() {
        let tree = vec![folder(
            "d1",
            "src",
            None,
            vec![file("f1", "main.rs", Some("d1"))],
        )];
        let (node, parent) = find_node_and_parent(&tree, "f1").unwrap();
        assert_eq!(node.name(), "main.rs");
        assert_eq!(parent.unwrap().id, "d1");
        let (_, root_parent) = find_node_and_parent(&tree, "d1").unwrap();
        assert!(root_parent.is_none());
    }

    #[test]
    fn unique_name_suffixes_before_extension() {
        let tree = vec![
            file("f1", "untitled.txt", None),
            file("f2", "untitled 1.txt", None),
        ];
        assert_eq!(unique_name(&tree, "untitled.txt", false, None), "untitled 2.txt");
        assert_eq!(unique_name(&tree, "other.txt", false, None), "other.txt");
    }

    #[test]
    fn unique_name_is_idempotent_until_insertion() {
        let tree = vec![file("f1", "a.js", None)];
        let first = unique_name(&tree, "a.js", false, None);
        let second = unique_name(&tree, "a.js", false, None);
        assert_eq!(first, second);
    }

    #[test]
    fn unique_name_folder_has_no_extension_handling() {
        let tree = vec![folder("d1", "New Folder", None, vec![])];
        assert_eq!(unique_name(&tree, "New Folder", true, None), "New Folder 1");
    }

    #[test]
    fn add_node_rejects_missing_and_file_parents() {
        let tree = vec![file("f1", "a.txt", None)];
        let err = add_node(tree.clone(), Some("ghost"), file("f2", "b.txt", None)).unwrap_err();
        assert_eq!(err, TreeError::ParentNotFound("ghost".to_string()));
        let err = add_node(tree, Some("f1"), file("f2", "b.txt", None)).unwrap_err();
        assert_eq!(err, TreeError::NotAFolder("f1".to_string()));
    }

    #[test]
    fn add_node_rewrites_parent_back_reference() {
        let tree = vec![folder("d1", "src", None, vec![])];
        let tree = add_node(tree, Some("d1"), file("f1", "a.txt", None)).unwrap();
        let (node, _) = find_node_and_parent(&tree, "f1").unwrap();
        assert_eq!(node.parent_id(), Some("d1"));
        verify_integrity(&tree).unwrap();
    }

    #[test]
    fn delete_folder_collects_descendant_file_ids() {
        let tree = vec![folder(
            "d1",
            "src",
            None,
            vec![
                file("f1", "a.txt", Some("d1")),
                folder("d2", "sub", Some("d1"), vec![file("f2", "b.txt", Some("d2"))]),
            ],
        )];
        let (tree, deleted) = delete_node(tree, "d1").unwrap();
        assert!(tree.is_empty());
        let mut deleted = deleted;
        deleted.sort();
        assert_eq!(deleted, vec!["f1".to_string(), "f2".to_string()]);
    }

    #[test]
    fn move_into_current_parent_is_a_no_op() {
        let tree = vec![folder("d1", "src", None, vec![file("f1", "a.txt", Some("d1"))])];
        let moved = move_node(tree.clone(), "f1", Some("d1")).unwrap();
        assert_eq!(moved, tree);
    }

    #[test]
    fn move_rejects_cycle_into_descendant() {
        let tree = vec![folder(
            "d1",
            "outer",
            None,
            vec![folder("d2", "inner", Some("d1"), vec![])],
        )];
        let err = move_node(tree.clone(), "d1", Some("d2")).unwrap_err();
        assert!(matches!(err, TreeError::CyclicMove { .. }));
        let err = move_node(tree, "d1", Some("d1")).unwrap_err();
        assert!(matches!(err, TreeError::CyclicMove { .. }));
    }

    #[test]
    fn move_renames_against_destination_siblings() {
        let tree = vec![
            folder("d1", "src", None, vec![file("f1", "a.txt", Some("d1"))]),
            file("f2", "a.txt", None),
        ];
        let tree = move_node(tree, "f2", Some("d1")).unwrap();
        let (node, parent) = find_node_and_parent(&tree, "f2").unwrap();
        assert_eq!(parent.unwrap().id, "d1");
        assert_eq!(node.name(), "a 1.txt");
        verify_integrity(&tree).unwrap();
    }

    #[test]
    fn move_to_root_keeps_name_when_free() {
        let tree = vec![folder("d1", "src", None, vec![file("f1", "a.txt", Some("d1"))])];
        let tree = move_node(tree, "f1", None).unwrap();
        let (node, parent) = find_node_and_parent(&tree, "f1").unwrap();
        assert!(parent.is_none());
        assert_eq!(node.name(), "a.txt");
        verify_integrity(&tree).unwrap();
    }

    #[test]
    fn integrity_detects_stale_parent_reference() {
        let tree = vec![file("f1", "a.txt", Some("ghost"))];
        assert!(verify_integrity(&tree).is_err());
    }

    #[test]
    fn duplicate_names_reported_not_rejected() {
        let tree = vec![file("f1", "a.txt", None), file("f2", "b.txt", None)];
        let tree = rename_node(tree, "f2", "a.txt").unwrap();
        assert_eq!(duplicate_sibling_names(&tree), vec!["/a.txt".to_string()]);
    }
}
