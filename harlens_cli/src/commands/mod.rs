//! CLI commands

pub mod config;
pub mod list;
pub mod serve;
pub mod show;
pub mod tui;

use anyhow::{Context, Result};
use harlens_common::Trace;
use std::path::Path;

/// Load a HAR file, attaching the path to any error
pub fn load_trace(path: &Path) -> Result<Trace> {
    Trace::from_path(path).with_context(|| format!("Failed to load trace {}", path.display()))
}
