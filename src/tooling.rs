//! Tooling & Integration Layer
//!
//! Command-line access to workspace snapshots: tree manipulation, learning
//! path repair, preview generation, and status inspection.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
