//! Serve a trace through the local web inspector

use crate::commands::load_trace;
use crate::config::Config;
use crate::inspector::{bind_inspector_port, router, start_server};
use anyhow::{Context, Result};
use console::style;
use std::path::PathBuf;
use std::sync::Arc;

/// Serve command options
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub file: PathBuf,
    pub port: Option<u16>,
    pub open: bool,
}

/// Load the trace and serve it until Ctrl+C
pub async fn run(config: &Config, opts: ServeOptions) -> Result<()> {
    let trace = Arc::new(load_trace(&opts.file)?);

    // Fail early on malformed batches instead of on the first page load
    let rows = trace
        .inspect("", &config.classifier())
        .context("Failed to expand batch requests")?;

    let listener = bind_inspector_port(opts.port.unwrap_or(config.server.port)).await?;
    let addr = listener
        .local_addr()
        .context("Failed to read inspector address")?;
    let url = format!("http://localhost:{}", addr.port());

    let source = opts
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| opts.file.display().to_string());

    let app = router(trace, config.classifier(), source);
    let handle = start_server(listener, app);
    tracing::info!("Inspector listening on {}", addr);

    println!(
        "{} {} {}",
        style("Inspector:").dim(),
        style(&url).magenta().bold(),
        style(format!("({} entries)", rows.len())).dim()
    );
    println!("{}", style("Press Ctrl+C to stop").dim());

    if opts.open {
        if let Err(e) = open::that(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for Ctrl+C")?;
        }
        _ = handle => {
            anyhow::bail!("Inspector server stopped unexpectedly");
        }
    }

    Ok(())
}
