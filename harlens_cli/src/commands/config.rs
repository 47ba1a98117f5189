//! Config command: show or initialize the configuration file

use crate::config::{config_file, Config};
use anyhow::Result;
use console::style;
use std::path::Path;

/// Print the effective configuration, or write the defaults with `init`
pub async fn run(config: &Config, path: Option<&Path>, init: bool) -> Result<()> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(config_file);

    if init {
        if path.exists() {
            anyhow::bail!(
                "Config file already exists at {}. Remove it first to reinitialize.",
                path.display()
            );
        }
        Config::default().save_to(&path)?;
        println!("{} {}", style("Wrote default config to").green(), path.display());
        return Ok(());
    }

    let source = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("{} {}{}", style("Config file:").dim(), path.display(), source);
    println!();
    print!("{}", config.to_yaml()?);

    Ok(())
}
