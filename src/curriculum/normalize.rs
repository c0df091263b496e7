//! Validation and repair of externally-produced learning-path JSON.
//!
//! AI-generated payloads are untrusted and frequently incomplete: missing
//! steps, mis-shaped modules, absent ids. The pipeline is maximally lenient:
//! it always produces something displayable and completable rather than
//! surfacing a parse error, at the documented cost of discarding project
//! data when a module carries both lessons and a project.

use crate::coerce;
use crate::curriculum::{
    templates, GuidedProject, LearningModule, LearningPath, Lesson, ModuleContent, Priority,
};
use crate::error::RepairError;
use crate::types::{fresh_item_id, fresh_path_id};
use serde_json::Value;
use tracing::{debug, warn};

const DEFAULT_MODULE_TITLE: &str = "Untitled Module";
const DEFAULT_PROJECT_TITLE: &str = "Guided Project";
const STARTER_LESSON_TITLE: &str = "Introduction";
const STARTER_LESSON_PROMPT: &str =
    "Give me a beginner-friendly introduction to this module's topic, \
     with one small example I can try in the editor.";

/// Read-only top-level shape predicate.
///
/// True when the candidate is an object with a usable `id` or `title` and a
/// literal `modules` array. Everything below that level is repairable, so
/// this is the only gate [`normalize`] enforces.
pub fn validate(candidate: &Value) -> bool {
    shape_check(candidate).is_ok()
}

fn shape_check(candidate: &Value) -> Result<(), RepairError> {
    if !candidate.is_object() {
        return Err(RepairError::NotAnObject);
    }
    if coerce::non_empty_string(candidate, "id").is_none()
        && coerce::non_empty_string(candidate, "title").is_none()
    {
        return Err(RepairError::MissingIdentity);
    }
    if coerce::array(candidate, "modules").is_none() {
        return Err(RepairError::ModulesNotAList);
    }
    Ok(())
}

/// Coerce a candidate into a valid [`LearningPath`], never mutating the
/// input.
///
/// Fails only on the top-level shape checks; per-module content is always
/// repairable (defaults seeded, placeholder steps inserted, lessons-xor-
/// project enforced with lessons winning). A path with no modules at all is
/// seeded with one starter module so the result is always completable.
pub fn normalize(candidate: &Value) -> Result<LearningPath, RepairError> {
    shape_check(candidate)?;

    let id = coerce::non_empty_string(candidate, "id").unwrap_or_else(fresh_path_id);
    let title = coerce::string_or(candidate, "title", "Custom Path");
    let raw_modules = coerce::array(candidate, "modules").map(Vec::as_slice).unwrap_or(&[]);

    let mut modules: Vec<LearningModule> = raw_modules.iter().map(normalize_module).collect();
    if modules.is_empty() {
        debug!(path = %title, "path has no modules; seeding starter module");
        modules.push(starter_module());
    }
    Ok(LearningPath { id, title, modules })
}

fn starter_module() -> LearningModule {
    LearningModule {
        id: fresh_item_id(),
        title: DEFAULT_MODULE_TITLE.to_string(),
        content: ModuleContent::Lessons(vec![starter_lesson()]),
    }
}

fn normalize_module(raw: &Value) -> LearningModule {
    let id = coerce::non_empty_string(raw, "id").unwrap_or_else(fresh_item_id);
    let title = coerce::string_or(raw, "title", DEFAULT_MODULE_TITLE);

    let lessons = coerce::array(raw, "lessons")
        .map(|items| items.iter().map(normalize_item).collect::<Vec<_>>());
    let project = coerce::object(raw, "project").map(normalize_project);

    let content = match (lessons, project) {
        (Some(lessons), Some(_)) => {
            // Documented precedence rule, not a silent bug.
            warn!(module = %title, "module carries both lessons and a project; keeping lessons");
            ModuleContent::Lessons(lessons)
        }
        (Some(lessons), None) => ModuleContent::Lessons(lessons),
        (None, Some(project)) => ModuleContent::Project(project),
        (None, None) => {
            debug!(module = %title, "module has no content; seeding starter lesson");
            ModuleContent::Lessons(vec![starter_lesson()])
        }
    };

    LearningModule { id, title, content }
}

fn normalize_project(raw: &Value) -> GuidedProject {
    let title = coerce::string_or(raw, "title", DEFAULT_PROJECT_TITLE);
    let steps: Vec<Lesson> = coerce::array(raw, "steps")
        .map(|items| items.iter().map(normalize_item).collect())
        .unwrap_or_default();
    let steps = if steps.is_empty() {
        placeholder_steps()
    } else {
        steps
    };
    GuidedProject { title, steps }
}

fn normalize_item(raw: &Value) -> Lesson {
    let title = coerce::string_or(raw, "title", "Untitled");
    Lesson {
        id: coerce::non_empty_string(raw, "id").unwrap_or_else(fresh_item_id),
        prompt: coerce::string_or(
            raw,
            "prompt",
            &format!("Teach me about: {}", title),
        ),
        title,
        completed: coerce::bool_or(raw, "completed", false),
        priority: raw
            .get("priority")
            .and_then(Value::as_str)
            .and_then(Priority::parse)
            .unwrap_or_default(),
    }
}

fn starter_lesson() -> Lesson {
    Lesson {
        id: fresh_item_id(),
        title: STARTER_LESSON_TITLE.to_string(),
        prompt: STARTER_LESSON_PROMPT.to_string(),
        completed: false,
        priority: Priority::None,
    }
}

fn placeholder_steps() -> Vec<Lesson> {
    [
        (
            "Plan the project",
            "Help me plan this project: what files do I need and what should each one do?",
        ),
        (
            "Build the first version",
            "Walk me through building a first working version, one file at a time.",
        ),
        (
            "Polish and extend",
            "Review what I built and suggest one improvement to implement together.",
        ),
    ]
    .into_iter()
    .map(|(title, prompt)| Lesson {
        id: fresh_item_id(),
        title: title.to_string(),
        prompt: prompt.to_string(),
        completed: false,
        priority: Priority::None,
    })
    .collect()
}

/// Best-effort repair: [`normalize`] with the failure logged and flattened
/// to `None` so callers fall back to a built-in default path.
pub fn repair(candidate: &Value) -> Option<LearningPath> {
    match normalize(candidate) {
        Ok(path) => Some(path),
        Err(err) => {
            warn!(%err, "learning path beyond repair");
            None
        }
    }
}

/// Look up a path by id: the caller's custom paths first, then the built-in
/// standard templates. Always returns a deep copy so mutation never leaks
/// back into a shared template.
pub fn find_path_by_id(id: &str, custom_paths: &[LearningPath]) -> Option<LearningPath> {
    custom_paths
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .or_else(|| templates::standard_paths().into_iter().find(|p| p.id == id))
}
