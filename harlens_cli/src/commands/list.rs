//! Print the filtered entry table

use crate::commands::load_trace;
use crate::config::Config;
use crate::display::{format_duration_short, format_size_short, row_url, truncate_str};
use anyhow::{Context, Result};
use console::Style;
use harlens_common::{InspectorEntry, Severity};
use std::path::PathBuf;

/// List command options
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub file: PathBuf,
    pub search: String,
    pub json: bool,
}

/// List the entries of a trace that match the search term
pub async fn run(config: &Config, opts: ListOptions) -> Result<()> {
    let trace = load_trace(&opts.file)?;
    let rows = trace
        .inspect(&opts.search, &config.classifier())
        .context("Failed to expand batch requests")?;

    if opts.json {
        let json = serde_json::to_string_pretty(&rows).context("Failed to serialize entries")?;
        println!("{}", json);
        return Ok(());
    }

    if rows.is_empty() {
        if opts.search.is_empty() {
            println!("The trace has no entries.");
        } else {
            println!("No entries match \"{}\".", opts.search);
        }
        return Ok(());
    }

    println!(
        "{:>5} {:<7} {:<72} {:>6} {:>8} {:>8}",
        "#", "METHOD", "URL", "STATUS", "TIME", "SIZE"
    );
    println!("{}", "-".repeat(111));

    for (index, row) in rows.iter().enumerate() {
        println!("{}", severity_style(row.severity()).apply_to(format_row(index, row)));
    }

    let children = rows.iter().filter(|row| row.is_batch_child_entry).count();
    println!();
    println!("{} entries ({} batch sub-calls)", rows.len(), children);

    Ok(())
}

fn format_row(index: usize, row: &InspectorEntry) -> String {
    format!(
        "{:>5} {:<7} {:<72} {:>6} {:>8} {:>8}",
        index,
        truncate_str(&row.entry.request.method, 7),
        truncate_str(&row_url(row), 72),
        row.entry.response.status,
        format_duration_short(row.duration_ms()),
        format_size_short(row.entry.response.transfer_size),
    )
}

/// Terminal style for a row of the given severity
pub fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Normal => Style::new(),
        Severity::Warning => Style::new().yellow(),
        Severity::Error => Style::new().red().bold(),
    }
}
