//! Print the detail of one entry

use crate::commands::load_trace;
use crate::config::Config;
use crate::display::render_detail;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Show command options
#[derive(Debug, Clone)]
pub struct ShowOptions {
    pub file: PathBuf,
    pub index: usize,
    pub search: String,
}

/// Print the row at `index` of the table `list` would print for `search`
pub async fn run(config: &Config, opts: ShowOptions) -> Result<()> {
    let trace = load_trace(&opts.file)?;
    let rows = trace
        .inspect(&opts.search, &config.classifier())
        .context("Failed to expand batch requests")?;

    let row = rows.get(opts.index).ok_or_else(|| {
        anyhow::anyhow!(
            "Entry {} not found ({} entries match). Run `harlens list` to see indexes.",
            opts.index,
            rows.len()
        )
    })?;

    print!("{}", render_detail(row));
    Ok(())
}
