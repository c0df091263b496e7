//! CLI Tooling
//!
//! Command-line interface over a persisted workspace snapshot. Every command
//! loads the snapshot, applies one operation through the core, and saves the
//! result, so invocations are idempotent where the operation is.

use crate::config::{ConfigLoader, MentorConfig};
use crate::curriculum::{normalize, progress, templates, Priority};
use crate::error::ApiError;
use crate::preview;
use crate::store::local::LocalSnapshotStore;
use crate::store::{SnapshotStore, GUEST_KEY};
use crate::tree::node::Node;
use crate::tree::ops;
use crate::workspace::Workspace;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

/// Mentor CLI - workspace and learning-path state management
#[derive(Parser)]
#[command(name = "mentor")]
#[command(about = "Workspace tree and learning-path state management for an AI coding tutor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Snapshot directory (defaults to the platform data dir)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Snapshot key to operate on
    #[arg(long, default_value = GUEST_KEY)]
    pub key: String,

    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a fresh workspace seeded with starter files
    Init {
        /// Overwrite an existing snapshot
        #[arg(long)]
        force: bool,
    },
    /// File-tree commands
    Tree {
        #[command(subcommand)]
        command: TreeCommands,
    },
    /// Learning-path commands
    Path {
        #[command(subcommand)]
        command: PathCommands,
    },
    /// Emit the live-preview HTML document
    Preview,
    /// Show workspace status
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum TreeCommands {
    /// List the project tree
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Create a file with a unique default name
    NewFile {
        /// Parent folder id (root when omitted)
        #[arg(long)]
        parent: Option<String>,
    },
    /// Create a folder with a unique default name
    NewFolder {
        /// Parent folder id (root when omitted)
        #[arg(long)]
        parent: Option<String>,
    },
    /// Rename a node
    Rename { id: String, name: String },
    /// Move a node into a folder (or to the root)
    Move {
        id: String,
        /// Destination folder id (root when omitted)
        #[arg(long)]
        into: Option<String>,
    },
    /// Delete a node and its subtree
    Delete { id: String },
    /// Check tree integrity
    Validate {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum PathCommands {
    /// Check whether a JSON file passes the top-level shape checks
    Validate { file: PathBuf },
    /// Repair a JSON file into a valid learning path
    Repair {
        file: PathBuf,
        /// Write the repaired path here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Repair a JSON file and adopt it as the selected custom path
    Adopt { file: PathBuf },
    /// Select a path by id (custom paths, then standard templates)
    Select { id: String },
    /// List the built-in standard paths
    Templates,
    /// Show the selected path with progress
    Show,
    /// Mark a lesson or step complete
    Complete { item_id: String },
    /// Set a lesson or step priority (high, medium, low, none)
    Priority { item_id: String, level: String },
    /// Reset all progress on the selected path
    Reset,
}

/// CLI execution context: resolved config plus the snapshot store.
pub struct CliContext {
    store: LocalSnapshotStore,
    key: String,
    #[allow(dead_code)]
    config: MentorConfig,
}

impl CliContext {
    pub fn new(
        data_dir: Option<PathBuf>,
        key: String,
        config_path: Option<PathBuf>,
    ) -> Result<Self, ApiError> {
        let config = ConfigLoader::load(config_path.as_deref())
            .map_err(|e| ApiError::Config(e.to_string()))?;
        let store = match data_dir.or_else(|| config.storage.data_dir.clone()) {
            Some(dir) => LocalSnapshotStore::open(dir)?,
            None => LocalSnapshotStore::open_default()?,
        };
        Ok(Self { store, key, config })
    }

    pub fn store(&self) -> &LocalSnapshotStore {
        &self.store
    }

    fn load_workspace(&self) -> Result<Workspace, ApiError> {
        self.store
            .load(&self.key)?
            .ok_or_else(|| ApiError::InvalidInput(format!(
                "no snapshot under key '{}'; run 'mentor init' first",
                self.key
            )))
    }

    fn save_workspace(&self, ws: &Workspace) -> Result<(), ApiError> {
        self.store.save(&self.key, ws)?;
        Ok(())
    }

    /// Execute a CLI command, returning its printable output.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Init { force } => self.cmd_init(*force),
            Commands::Tree { command } => self.cmd_tree(command),
            Commands::Path { command } => self.cmd_path(command),
            Commands::Preview => {
                let ws = self.load_workspace()?;
                Ok(preview::render_from_tree(&ws.project_files))
            }
            Commands::Status { format } => self.cmd_status(format),
        }
    }

    fn cmd_init(&self, force: bool) -> Result<String, ApiError> {
        if !force && self.store.load(&self.key)?.is_some() {
            return Err(ApiError::InvalidInput(format!(
                "snapshot '{}' already exists (use --force to overwrite)",
                self.key
            )));
        }
        let ws = Workspace::with_starter_files();
        self.save_workspace(&ws)?;
        info!(key = %self.key, "initialized workspace");
        Ok(format!(
            "Initialized workspace '{}' with {} starter files",
            self.key,
            ws.project_files.len()
        ))
    }

    fn cmd_tree(&self, command: &TreeCommands) -> Result<String, ApiError> {
        match command {
            TreeCommands::List { format } => {
                let ws = self.load_workspace()?;
                if format == "json" {
                    return to_pretty_json(&ws.project_files);
                }
                Ok(format_tree_table(&ws.project_files))
            }
            TreeCommands::NewFile { parent } => {
                let mut ws = self.load_workspace()?;
                let id = ws.create_file(parent.as_deref())?;
                let name = ops::find_node(&ws.project_files, &id)
                    .map(|n| n.name().to_string())
                    .unwrap_or_default();
                self.save_workspace(&ws)?;
                Ok(format!("Created file '{}' ({})", name, id))
            }
            TreeCommands::NewFolder { parent } => {
                let mut ws = self.load_workspace()?;
                let id = ws.create_folder(parent.as_deref())?;
                let name = ops::find_node(&ws.project_files, &id)
                    .map(|n| n.name().to_string())
                    .unwrap_or_default();
                self.save_workspace(&ws)?;
                Ok(format!("Created folder '{}' ({})", name, id))
            }
            TreeCommands::Rename { id, name } => {
                let mut ws = self.load_workspace()?;
                ws.rename_node(id, name)?;
                self.save_workspace(&ws)?;
                Ok(format!("Renamed {} to '{}'", id, name))
            }
            TreeCommands::Move { id, into } => {
                let mut ws = self.load_workspace()?;
                ws.move_node(id, into.as_deref())?;
                self.save_workspace(&ws)?;
                match into {
                    Some(target) => Ok(format!("Moved {} into {}", id, target)),
                    None => Ok(format!("Moved {} to the root", id)),
                }
            }
            TreeCommands::Delete { id } => {
                let mut ws = self.load_workspace()?;
                let existed = ops::find_node(&ws.project_files, id).is_some();
                ws.delete_node(id);
                self.save_workspace(&ws)?;
                if existed {
                    Ok(format!("Deleted {}", id))
                } else {
                    Ok(format!("Node {} not found; nothing deleted", id))
                }
            }
            TreeCommands::Validate { format } => {
                let ws = self.load_workspace()?;
                let errors: Vec<String> = match ops::verify_integrity(&ws.project_files) {
                    Ok(()) => Vec::new(),
                    Err(e) => vec![e.to_string()],
                };
                let duplicates = ops::duplicate_sibling_names(&ws.project_files);
                let valid = errors.is_empty();
                if format == "json" {
                    return to_pretty_json(&json!({
                        "valid": valid,
                        "node_count": count_nodes(&ws.project_files),
                        "errors": errors,
                        "duplicate_names": duplicates,
                    }));
                }
                let mut out = if valid {
                    format!("{}\n", "Tree is valid".green())
                } else {
                    format!("{}\n", "Tree is INVALID".red())
                };
                for e in &errors {
                    out.push_str(&format!("  error: {}\n", e));
                }
                for d in &duplicates {
                    out.push_str(&format!("  duplicate name: {}\n", d));
                }
                Ok(out)
            }
        }
    }

    fn cmd_path(&self, command: &PathCommands) -> Result<String, ApiError> {
        match command {
            PathCommands::Validate { file } => {
                let candidate = read_json(file)?;
                if normalize::validate(&candidate) {
                    Ok("valid".to_string())
                } else {
                    Ok("invalid".to_string())
                }
            }
            PathCommands::Repair { file, output } => {
                let candidate = read_json(file)?;
                let path = normalize::normalize(&candidate)?;
                let text = serde_json::to_string_pretty(&path)
                    .map_err(|e| ApiError::InvalidInput(e.to_string()))?;
                match output {
                    Some(out) => {
                        std::fs::write(out, &text)
                            .map_err(|e| ApiError::Store(e.into()))?;
                        Ok(format!("Repaired path written to {}", out.display()))
                    }
                    None => Ok(text),
                }
            }
            PathCommands::Adopt { file } => {
                let candidate = read_json(file)?;
                let mut ws = self.load_workspace()?;
                let id = ws.adopt_custom_path(&candidate)?;
                self.save_workspace(&ws)?;
                Ok(format!("Adopted custom path {}", id))
            }
            PathCommands::Select { id } => {
                let mut ws = self.load_workspace()?;
                if !ws.select_path(id) {
                    return Err(ApiError::InvalidInput(format!(
                        "no learning path with id '{}'",
                        id
                    )));
                }
                self.save_workspace(&ws)?;
                Ok(format!("Selected path {}", id))
            }
            PathCommands::Templates => {
                let mut out = String::from("Standard paths:\n");
                for path in templates::standard_paths() {
                    out.push_str(&format!(
                        "  {} - {} ({} modules)\n",
                        path.id,
                        path.title,
                        path.modules.len()
                    ));
                }
                Ok(out)
            }
            PathCommands::Show => {
                let ws = self.load_workspace()?;
                let Some(path) = &ws.learning_path else {
                    return Ok("No learning path selected".to_string());
                };
                Ok(format_path(path))
            }
            PathCommands::Complete { item_id } => {
                let mut ws = self.load_workspace()?;
                let earned = ws.complete_item(item_id);
                self.save_workspace(&ws)?;
                if earned > 0 {
                    Ok(format!("Completed {} (+{} points)", item_id, earned))
                } else {
                    Ok(format!("{} already complete or not found", item_id))
                }
            }
            PathCommands::Priority { item_id, level } => {
                let priority = Priority::parse(level).ok_or_else(|| {
                    ApiError::InvalidInput(format!(
                        "invalid priority '{}' (high, medium, low, none)",
                        level
                    ))
                })?;
                let mut ws = self.load_workspace()?;
                if !ws.set_item_priority(item_id, priority) {
                    return Err(ApiError::InvalidInput(format!(
                        "no lesson or step with id '{}'",
                        item_id
                    )));
                }
                self.save_workspace(&ws)?;
                Ok(format!("Set priority of {} to {}", item_id, level))
            }
            PathCommands::Reset => {
                let mut ws = self.load_workspace()?;
                ws.reset_path_progress();
                self.save_workspace(&ws)?;
                Ok("Progress reset".to_string())
            }
        }
    }

    fn cmd_status(&self, format: &str) -> Result<String, ApiError> {
        let ws = self.load_workspace()?;
        let (files, folders) = count_kinds(&ws.project_files);
        let path_status = ws.learning_path.as_ref().map(|path| {
            let summary = progress::summarize(path);
            json!({
                "id": path.id,
                "title": path.title,
                "total": summary.total,
                "completed": summary.completed,
                "percent": summary.percent,
            })
        });

        if format == "json" {
            return to_pretty_json(&json!({
                "files": files,
                "folders": folders,
                "open_tabs": ws.open_file_ids.len(),
                "active_file": ws.active_file_id,
                "points": ws.points,
                "custom_paths": ws.custom_learning_paths.len(),
                "path": path_status,
            }));
        }

        let mut out = String::new();
        out.push_str(&format!(
            "Workspace: {} files, {} folders, {} open tabs\n",
            files,
            folders,
            ws.open_file_ids.len()
        ));
        out.push_str(&format!("Points: {}\n", ws.points.yellow()));
        match &ws.learning_path {
            Some(path) => {
                let summary = progress::summarize(path);
                out.push_str(&format!(
                    "Path: {} ({}/{} complete, {}%)\n",
                    path.title.bold(),
                    summary.completed,
                    summary.total,
                    summary.percent
                ));
            }
            None => out.push_str("Path: none selected\n"),
        }
        Ok(out)
    }
}

fn read_json(path: &PathBuf) -> Result<serde_json::Value, ApiError> {
    let text = std::fs::read_to_string(path).map_err(|e| ApiError::Store(e.into()))?;
    serde_json::from_str(&text)
        .map_err(|e| ApiError::InvalidInput(format!("not valid JSON: {}", e)))
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(|e| ApiError::InvalidInput(e.to_string()))
}

fn count_nodes(tree: &[Node]) -> usize {
    let (files, folders) = count_kinds(tree);
    files + folders
}

fn count_kinds(tree: &[Node]) -> (usize, usize) {
    let mut files = 0;
    let mut folders = 0;
    fn walk(nodes: &[Node], files: &mut usize, folders: &mut usize) {
        for node in nodes {
            match node {
                Node::File(_) => *files += 1,
                Node::Folder(folder) => {
                    *folders += 1;
                    walk(&folder.children, files, folders);
                }
            }
        }
    }
    walk(tree, &mut files, &mut folders);
    (files, folders)
}

fn format_tree_table(tree: &[Node]) -> String {
    use comfy_table::Table;
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Name", "Kind", "Id", "Parent"]);
    fn walk(nodes: &[Node], depth: usize, table: &mut Table) {
        for node in nodes {
            let indent = "  ".repeat(depth);
            let kind = if node.is_folder() { "folder" } else { "file" };
            table.add_row(vec![
                format!("{}{}", indent, node.name()),
                kind.to_string(),
                node.id().to_string(),
                node.parent_id().unwrap_or("-").to_string(),
            ]);
            if let Node::Folder(folder) = node {
                walk(&folder.children, depth + 1, table);
            }
        }
    }
    walk(tree, 0, &mut table);
    table.to_string()
}

fn format_path(path: &crate::curriculum::LearningPath) -> String {
    let summary = progress::summarize(path);
    let mut out = format!(
        "{} ({}/{} complete, {} points)\n",
        path.title, summary.completed, summary.total, summary.points
    );
    for module in &path.modules {
        out.push_str(&format!("  {}\n", module.title.bold()));
        let items: &[crate::curriculum::Lesson] = match &module.content {
            crate::curriculum::ModuleContent::Lessons(lessons) => lessons,
            crate::curriculum::ModuleContent::Project(project) => &project.steps,
        };
        for item in items {
            let mark = if item.completed { "x" } else { " " };
            let priority = match item.priority {
                Priority::None => String::new(),
                p => format!(" [{}]", p.as_str()),
            };
            out.push_str(&format!(
                "    [{}] {} ({}){}\n",
                mark, item.title, item.id, priority
            ));
        }
    }
    out
}
