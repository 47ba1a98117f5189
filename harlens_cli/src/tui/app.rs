//! TUI application state and event handling

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use harlens_common::{BatchClassifier, InspectorEntry, PathClassifier, Trace};

/// Rows moved by PageUp/PageDown
const PAGE_SIZE: usize = 10;

/// TUI view modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Table,
    Detail,
}

/// Events that can be sent to the TUI
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Key event from terminal
    Key(KeyEvent),
    /// Tick for periodic updates
    Tick,
}

/// TUI application state
pub struct TuiApp {
    trace: Trace,
    classifier: PathClassifier,
    pub source: String,
    pub view: View,
    pub search: String,
    pub rows: Vec<InspectorEntry>,
    /// Set when the last pass failed; `rows` is empty then
    pub error: Option<String>,
    pub selected_index: usize,
    pub detail_scroll: u16,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new(trace: Trace, classifier: PathClassifier, source: String) -> Self {
        let mut app = Self {
            trace,
            classifier,
            source,
            view: View::Table,
            search: String::new(),
            rows: Vec::new(),
            error: None,
            selected_index: 0,
            detail_scroll: 0,
            should_quit: false,
        };
        app.refresh();
        app
    }

    pub fn total_entries(&self) -> usize {
        self.trace.entries().len()
    }

    pub fn selected(&self) -> Option<&InspectorEntry> {
        self.rows.get(self.selected_index)
    }

    /// Set the search term and recompute the rows
    pub fn set_search(&mut self, search: String) {
        self.search = search;
        self.refresh();
    }

    /// Recompute the rows from the trace. Selection does not survive a pass.
    fn refresh(&mut self) {
        match filter_rows(&self.trace, &self.search, &self.classifier) {
            Ok(rows) => {
                self.rows = rows;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!("Inspection failed for search {:?}: {}", self.search, e);
                self.rows.clear();
                self.error = Some(e);
            }
        }
        self.selected_index = 0;
        self.detail_scroll = 0;
    }

    fn last_index(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        match (key.code, key.modifiers) {
            // Quit
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            _ => match self.view {
                View::Table => self.handle_table_key(key),
                View::Detail => self.handle_detail_key(key),
            },
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            // Clear search
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.set_search(String::new());
            }
            (KeyCode::Esc, _) if !self.search.is_empty() => {
                self.set_search(String::new());
            }
            (KeyCode::Esc, _) => {
                self.should_quit = true;
            }
            (KeyCode::Enter, _) if self.selected().is_some() => {
                self.view = View::Detail;
                self.detail_scroll = 0;
            }
            // Navigation
            (KeyCode::Up, _) => {
                self.selected_index = self.selected_index.saturating_sub(1);
            }
            (KeyCode::Down, _) => {
                self.selected_index = (self.selected_index + 1).min(self.last_index());
            }
            (KeyCode::PageUp, _) => {
                self.selected_index = self.selected_index.saturating_sub(PAGE_SIZE);
            }
            (KeyCode::PageDown, _) => {
                self.selected_index = (self.selected_index + PAGE_SIZE).min(self.last_index());
            }
            (KeyCode::Home, _) => {
                self.selected_index = 0;
            }
            (KeyCode::End, _) => {
                self.selected_index = self.last_index();
            }
            // Search box editing
            (KeyCode::Backspace, _) => {
                let mut search = self.search.clone();
                if search.pop().is_some() {
                    self.set_search(search);
                }
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let mut search = self.search.clone();
                search.push(c);
                self.set_search(search);
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => {
                self.view = View::Table;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.detail_scroll = self.detail_scroll.saturating_add(1);
            }
            KeyCode::PageUp => {
                self.detail_scroll = self.detail_scroll.saturating_sub(PAGE_SIZE as u16);
            }
            KeyCode::PageDown => {
                self.detail_scroll = self.detail_scroll.saturating_add(PAGE_SIZE as u16);
            }
            KeyCode::Home => {
                self.detail_scroll = 0;
            }
            _ => {}
        }
    }

    /// Handle TUI event
    pub fn handle_event(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Key(key) => self.handle_key(key),
            TuiEvent::Tick => {} // Just triggers a redraw
        }
    }
}

fn filter_rows(
    trace: &Trace,
    search: &str,
    classifier: &dyn BatchClassifier,
) -> Result<Vec<InspectorEntry>, String> {
    trace.inspect(search, classifier).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn typed(app: &mut TuiApp, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn trace(response_text: &str) -> Trace {
        serde_json::from_value(json!({
            "log": {
                "entries": [
                    {
                        "request": {"method": "GET", "url": "https://api.x.com/home"},
                        "response": {"status": 200}
                    },
                    {
                        "request": {
                            "method": "POST",
                            "url": "https://api.x.com/batch",
                            "postData": {
                                "mimeType": "application/json",
                                "text": json!({"requests": [
                                    {"url": "/users/1", "httpMethod": "GET"},
                                    {"url": "/orders/2", "httpMethod": "GET"}
                                ]}).to_string()
                            }
                        },
                        "response": {
                            "status": 200,
                            "content": {"mimeType": "application/json", "text": response_text}
                        }
                    }
                ]
            }
        }))
        .unwrap()
    }

    fn app() -> TuiApp {
        let responses = json!({"responses": [{"httpStatusCode": 200}, {"httpStatusCode": 404}]});
        TuiApp::new(
            trace(&responses.to_string()),
            PathClassifier::default(),
            "test.har".to_string(),
        )
    }

    #[test]
    fn test_initial_rows() {
        let app = app();
        assert_eq!(app.total_entries(), 2);
        assert_eq!(app.rows.len(), 4);
        assert_eq!(app.error, None);
        assert_eq!(app.view, View::Table);
    }

    #[test]
    fn test_typing_filters_rows() {
        let mut app = app();
        typed(&mut app, "Orders");

        assert_eq!(app.search, "Orders");
        assert_eq!(app.rows.len(), 1);
        assert!(app.rows[0].is_batch_child_entry);

        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.search, "Order");

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.search, "");
        assert_eq!(app.rows.len(), 4);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut app = app();

        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected_index, 0);

        app.handle_key(key(KeyCode::PageDown));
        assert_eq!(app.selected_index, 3);

        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected_index, 3);

        app.handle_key(key(KeyCode::Home));
        assert_eq!(app.selected_index, 0);

        app.handle_key(key(KeyCode::End));
        assert_eq!(app.selected_index, 3);
    }

    #[test]
    fn test_search_resets_selection() {
        let mut app = app();
        app.handle_key(key(KeyCode::End));
        typed(&mut app, "u");
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_detail_view() {
        let mut app = app();
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.view, View::Detail);
        assert_eq!(app.selected().unwrap().entry.request.url, "https://api.x.com/batch");

        // Letters scroll the detail instead of editing the search
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.detail_scroll, 1);
        assert_eq!(app.search, "");

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.view, View::Table);
    }

    #[test]
    fn test_enter_without_rows_stays_in_table() {
        let mut app = app();
        typed(&mut app, "nothing-matches");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.view, View::Table);
    }

    #[test]
    fn test_failed_pass_shows_error() {
        let mut app = TuiApp::new(
            trace("not json"),
            PathClassifier::default(),
            "broken.har".to_string(),
        );
        assert!(app.rows.is_empty());
        assert!(app.error.as_deref().unwrap().contains("Malformed batch envelope"));

        // A search that matches no sub-call still parses the envelope
        typed(&mut app, "home");
        assert!(app.error.is_some());
    }

    #[test]
    fn test_quit_keys() {
        let mut first = app();
        first.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(first.should_quit);

        let mut second = app();
        second.handle_key(key(KeyCode::Esc));
        assert!(second.should_quit);
    }
}
