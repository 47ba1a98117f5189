//! Interactive trace browser

use crate::commands::load_trace;
use crate::config::Config;
use crate::tui::{TuiApp, TuiEvent};
use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

/// TUI command options
#[derive(Debug, Clone)]
pub struct TuiOptions {
    pub file: PathBuf,
    pub search: String,
}

/// Open a trace in the terminal browser
pub async fn run(config: &Config, opts: TuiOptions) -> Result<()> {
    let trace = load_trace(&opts.file)?;
    let source = opts.file.display().to_string();

    let mut app = TuiApp::new(trace, config.classifier(), source);
    if !opts.search.is_empty() {
        app.set_search(opts.search);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_tui_loop(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_tui_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut TuiApp,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    loop {
        terminal.draw(|f| crate::tui::draw(f, app))?;

        tick_interval.tick().await;

        // Drain pending keys before the next redraw
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                app.handle_event(TuiEvent::Key(key));
            }
        }
        app.handle_event(TuiEvent::Tick);

        if app.should_quit {
            tracing::debug!("Closing trace browser");
            return Ok(());
        }
    }
}
