//! Integration tests for the learning-path repair pipeline.

use mentor::curriculum::normalize::{find_path_by_id, normalize, repair, validate};
use mentor::curriculum::{progress, templates, ModuleContent, Priority};
use serde_json::{json, Value};

#[test]
fn validate_rejects_only_top_level_misshapes() {
    assert!(!validate(&Value::Null));
    assert!(!validate(&json!("a string")));
    assert!(!validate(&json!({})));
    assert!(!validate(&json!({"modules": []})));
    assert!(!validate(&json!({"title": "t", "modules": "not-an-array"})));
    assert!(!validate(&json!({"title": "t", "modules": {"0": {}}})));
    assert!(validate(&json!({"title": "t", "modules": []})));
}

#[test]
fn every_module_ends_up_with_exactly_one_content_source() {
    let candidate = json!({
        "title": "Messy",
        "modules": [
            {"title": "lessons only", "lessons": [{"title": "L"}]},
            {"title": "project only", "project": {"title": "P", "steps": [{"title": "S"}]}},
            {"title": "both", "lessons": [{"title": "L"}], "project": {"title": "P"}},
            {"title": "neither"},
            {"lessons": "garbage", "project": null},
            {"title": "", "project": {"steps": []}},
            42,
            null
        ]
    });
    let path = normalize(&candidate).unwrap();
    assert_eq!(path.modules.len(), 8);
    for module in &path.modules {
        assert!(!module.title.is_empty());
        match &module.content {
            ModuleContent::Lessons(lessons) => assert!(!lessons.is_empty()),
            ModuleContent::Project(project) => {
                assert!(!project.title.is_empty());
                assert!(!project.steps.is_empty());
            }
        }
    }
    // the "both" module kept its lessons
    assert!(path.modules[2].lessons().is_some());
    // mis-typed lessons plus null project falls back to a starter lesson
    assert!(path.modules[4].lessons().is_some());
    // untitled stepless project gets defaults and three placeholders
    let seeded = path.modules[5].project().unwrap();
    assert_eq!(seeded.title, "Guided Project");
    assert_eq!(seeded.steps.len(), 3);
}

#[test]
fn moduleless_path_is_seeded_with_a_starter_module() {
    let path = normalize(&json!({"title": "T", "modules": []})).unwrap();
    assert!(!path.modules.is_empty());
    let lessons = path.modules[0].lessons().unwrap();
    assert!(!lessons.is_empty());
    assert!(!lessons[0].prompt.is_empty());
}

#[test]
fn stepless_project_is_seeded_with_three_steps() {
    let candidate = json!({"title": "T", "modules": [{"title": "M", "project": {"title": "P"}}]});
    let path = normalize(&candidate).unwrap();
    let project = path.modules[0].project().unwrap();
    assert_eq!(project.steps.len(), 3);
    assert!(path.modules[0].lessons().is_none());
    for step in &project.steps {
        assert!(!step.title.is_empty());
        assert!(!step.prompt.is_empty());
        assert!(!step.completed);
    }
}

#[test]
fn progress_flags_survive_repair() {
    let candidate = json!({
        "id": "p",
        "title": "T",
        "modules": [{"title": "M", "lessons": [
            {"id": "l1", "title": "A", "prompt": "x", "completed": true, "priority": "medium"},
            {"id": "l2", "title": "B", "prompt": "y", "completed": "yes-but-wrong-type"}
        ]}]
    });
    let path = normalize(&candidate).unwrap();
    let lessons = path.modules[0].lessons().unwrap();
    assert!(lessons[0].completed);
    assert_eq!(lessons[0].priority, Priority::Medium);
    assert!(!lessons[1].completed);
    assert_eq!(lessons[1].priority, Priority::None);
}

#[test]
fn repair_returns_none_when_beyond_repair() {
    assert!(repair(&Value::Null).is_none());
    assert!(repair(&json!({"modules": []})).is_none());
    assert!(repair(&json!({"title": "t"})).is_none());
}

#[test]
fn repair_is_idempotent_over_its_own_output() {
    let candidate = json!({
        "id": "p1",
        "title": "T",
        "modules": [
            {"id": "m1", "title": "M",
             "lessons": [{"id": "l1", "title": "L", "prompt": "p"}]},
            {"id": "m2", "title": "N",
             "project": {"title": "P", "steps": [{"id": "s1", "title": "S", "prompt": "q"}]}}
        ]
    });
    let once = repair(&candidate).unwrap();
    let twice = repair(&serde_json::to_value(&once).unwrap()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn module_json_carries_lessons_xor_project() {
    let candidate = json!({
        "title": "T",
        "modules": [{"title": "M", "project": {"title": "P"}}]
    });
    let path = normalize(&candidate).unwrap();
    let value = serde_json::to_value(&path).unwrap();
    let module = &value["modules"][0];
    assert!(module.get("project").is_some());
    assert!(module.get("lessons").is_none());
}

#[test]
fn standard_templates_resolve_and_are_copies() {
    let catalog = templates::standard_paths();
    assert!(!catalog.is_empty());
    let id = catalog[0].id.clone();
    let mut copy = find_path_by_id(&id, &[]).unwrap();
    let first_item = copy.items().next().unwrap().id.clone();
    progress::set_completed(&mut copy, &first_item);
    let fresh = find_path_by_id(&id, &[]).unwrap();
    assert!(!fresh.find_item(&first_item).unwrap().completed);
}
