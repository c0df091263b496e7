//! Built-in standard learning paths.
//!
//! Templates are read-only: lookups hand out deep copies so a user's
//! progress never leaks back into the shared catalog.

use crate::curriculum::{
    GuidedProject, LearningModule, LearningPath, Lesson, ModuleContent, Priority,
};

fn lesson(id: &str, title: &str, prompt: &str) -> Lesson {
    Lesson {
        id: id.to_string(),
        title: title.to_string(),
        prompt: prompt.to_string(),
        completed: false,
        priority: Priority::None,
    }
}

/// The standard path catalog shipped with the application.
pub fn standard_paths() -> Vec<LearningPath> {
    vec![web_basics(), first_website()]
}

fn web_basics() -> LearningPath {
    LearningPath {
        id: "web-basics".to_string(),
        title: "Web Development Basics".to_string(),
        modules: vec![
            LearningModule {
                id: "web-basics-html".to_string(),
                title: "HTML Foundations".to_string(),
                content: ModuleContent::Lessons(vec![
                    lesson(
                        "html-structure",
                        "Page Structure",
                        "Teach me the structure of an HTML page: doctype, head, body, \
                         and the most common tags. Use the index.html in my editor.",
                    ),
                    lesson(
                        "html-text",
                        "Text and Links",
                        "Show me headings, paragraphs, lists, and links in HTML with \
                         small examples I can paste into my page.",
                    ),
                ]),
            },
            LearningModule {
                id: "web-basics-css".to_string(),
                title: "Styling with CSS".to_string(),
                content: ModuleContent::Lessons(vec![
                    lesson(
                        "css-selectors",
                        "Selectors and Colors",
                        "Explain CSS selectors and basic properties, then help me style \
                         the page in my editor using style.css.",
                    ),
                    lesson(
                        "css-layout",
                        "Layout Basics",
                        "Teach me flexbox with a small layout exercise for my page.",
                    ),
                ]),
            },
            LearningModule {
                id: "web-basics-js".to_string(),
                title: "JavaScript Essentials".to_string(),
                content: ModuleContent::Lessons(vec![lesson(
                    "js-dom",
                    "Talking to the Page",
                    "Show me how to select elements and react to clicks in script.js, \
                     with an exercise I can preview live.",
                )]),
            },
        ],
    }
}

fn first_website() -> LearningPath {
    LearningPath {
        id: "first-website".to_string(),
        title: "Build Your First Website".to_string(),
        modules: vec![LearningModule {
            id: "first-website-project".to_string(),
            title: "Guided Project: Personal Page".to_string(),
            content: ModuleContent::Project(GuidedProject {
                title: "Personal Page".to_string(),
                steps: vec![
                    lesson(
                        "fw-step-outline",
                        "Sketch the page",
                        "Help me outline a simple personal page: sections, headings, \
                         and what goes in each file.",
                    ),
                    lesson(
                        "fw-step-markup",
                        "Write the markup",
                        "Guide me through writing the HTML for my personal page, one \
                         section at a time.",
                    ),
                    lesson(
                        "fw-step-style",
                        "Style it",
                        "Help me style the page: colors, spacing, and a simple layout.",
                    ),
                    lesson(
                        "fw-step-interact",
                        "Add an interaction",
                        "Add one small JavaScript interaction to the page and explain \
                         how it works.",
                    ),
                ],
            }),
        }],
    }
}
