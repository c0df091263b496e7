//! Learning-path domain: typed model, repair pipeline, templates, progress.

pub mod normalize;
pub mod progress;
pub mod templates;

use crate::types::{ItemId, PathId};
use serde::{Deserialize, Serialize};

/// User-assigned priority on a lesson or step. Freely mutable at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
    #[default]
    None,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::None => "none",
        }
    }

    pub fn parse(s: &str) -> Option<Priority> {
        match s {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            "none" => Some(Priority::None),
            _ => None,
        }
    }
}

/// A single lesson: selecting it sends `prompt` to the AI chat.
///
/// `completed` is monotonic: once true it stays true until an explicit
/// path-progress reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: ItemId,
    pub title: String,
    pub prompt: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
}

/// One step of a guided project; same progress semantics as a lesson.
pub type ProjectStep = Lesson;

/// A guided multi-step project. `steps` is never empty after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidedProject {
    pub title: String,
    pub steps: Vec<ProjectStep>,
}

/// Exactly one content source per module, enforced by construction.
///
/// Flattened into the module object so JSON carries `lessons: […]` xor
/// `project: {…}`, matching the persisted shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleContent {
    Lessons(Vec<Lesson>),
    Project(GuidedProject),
}

/// A titled unit of a learning path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningModule {
    pub id: ItemId,
    pub title: String,
    #[serde(flatten)]
    pub content: ModuleContent,
}

/// A named, ordered curriculum of modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub id: PathId,
    pub title: String,
    pub modules: Vec<LearningModule>,
}

impl LearningModule {
    pub fn lessons(&self) -> Option<&[Lesson]> {
        match &self.content {
            ModuleContent::Lessons(lessons) => Some(lessons),
            ModuleContent::Project(_) => None,
        }
    }

    pub fn project(&self) -> Option<&GuidedProject> {
        match &self.content {
            ModuleContent::Project(project) => Some(project),
            ModuleContent::Lessons(_) => None,
        }
    }
}

impl LearningPath {
    /// Iterate every lesson and project step in curriculum order.
    pub fn items(&self) -> impl Iterator<Item = &Lesson> {
        self.modules.iter().flat_map(|m| match &m.content {
            ModuleContent::Lessons(lessons) => lessons.iter(),
            ModuleContent::Project(project) => project.steps.iter(),
        })
    }

    pub(crate) fn items_mut(&mut self) -> impl Iterator<Item = &mut Lesson> {
        self.modules.iter_mut().flat_map(|m| match &mut m.content {
            ModuleContent::Lessons(lessons) => lessons.iter_mut(),
            ModuleContent::Project(project) => project.steps.iter_mut(),
        })
    }

    /// Find a lesson or step by id.
    pub fn find_item(&self, item_id: &str) -> Option<&Lesson> {
        self.items().find(|item| item.id == item_id)
    }
}
