//! Harlens CLI - Inspect HAR traces with batch requests expanded
//!
//! Usage:
//!   harlens list <FILE>            Print the entry table
//!   harlens show <FILE> <INDEX>    Print one entry in full
//!   harlens tui <FILE>             Browse a trace in the terminal
//!   harlens serve <FILE>           Browse a trace in the web inspector
//!   harlens config                 Show or initialize the configuration

mod commands;
mod config;
mod display;
mod inspector;
mod tui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "harlens")]
#[command(author = "Harlens Team")]
#[command(version)]
#[command(about = "Inspect HAR traces with batch requests expanded", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to ~/.harlens/config.yml)
    #[arg(long, global = true, env = "HARLENS_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the entries of a trace, batch sub-calls included
    List {
        /// HAR file to read
        file: PathBuf,

        /// Only keep entries whose URL contains this text (case-insensitive)
        #[arg(short, long, default_value = "")]
        search: String,

        /// Print the rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one entry of the table in full
    Show {
        /// HAR file to read
        file: PathBuf,

        /// Row index as printed by `list`
        index: usize,

        /// Search term the index refers to
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Browse a trace in the terminal
    Tui {
        /// HAR file to read
        file: PathBuf,

        /// Initial search term
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Browse a trace in the web inspector
    Serve {
        /// HAR file to read
        file: PathBuf,

        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Open the inspector in the browser
        #[arg(long)]
        open: bool,
    },

    /// Show the effective configuration
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, matches!(cli.command, Commands::Tui { .. }))?;

    // `config --init` must work before the file exists
    let config = match &cli.command {
        Commands::Config { init: true } => config::Config::default(),
        _ => config::Config::load(cli.config.as_deref())?,
    };

    // Handle commands
    match cli.command {
        Commands::List { file, search, json } => {
            let opts = commands::list::ListOptions { file, search, json };
            commands::list::run(&config, opts).await?;
        }

        Commands::Show { file, index, search } => {
            let opts = commands::show::ShowOptions { file, index, search };
            commands::show::run(&config, opts).await?;
        }

        Commands::Tui { file, search } => {
            let opts = commands::tui::TuiOptions { file, search };
            commands::tui::run(&config, opts).await?;
        }

        Commands::Serve { file, port, open } => {
            let opts = commands::serve::ServeOptions { file, port, open };
            commands::serve::run(&config, opts).await?;
        }

        Commands::Config { init } => {
            commands::config::run(&config, cli.config.as_deref(), init).await?;
        }
    }

    Ok(())
}

/// Log to stderr, or to a file while the TUI owns the terminal
fn init_logging(verbose: bool, to_file: bool) -> Result<()> {
    let log_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{},harlens_cli=info", log_level).into());

    let (stderr_layer, file_layer) = if to_file {
        config::ensure_dirs()?;
        let path = config::logs_dir().join("harlens.log");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        let layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file));
        (None, Some(layer))
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .without_time()
            .with_writer(std::io::stderr);
        (Some(layer), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}
