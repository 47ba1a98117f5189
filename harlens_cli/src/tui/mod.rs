//! Terminal User Interface for browsing a trace

mod app;
mod ui;

pub use app::{TuiApp, TuiEvent};
pub use ui::draw;
