//! Mentor: AI Coding Tutor State Management
//!
//! In-memory state management for a coding-tutor application: a virtual
//! project file tree with structural mutation operations, and a lenient
//! validation/repair pipeline that coerces AI-generated learning-path JSON
//! into a consistent typed shape.

pub mod chat;
pub mod coerce;
pub mod config;
pub mod curriculum;
pub mod error;
pub mod logging;
pub mod preview;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;
pub mod workspace;
