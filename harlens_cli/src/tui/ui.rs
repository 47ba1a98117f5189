//! TUI rendering functions

use super::app::{TuiApp, View};
use crate::display::{format_duration_short, format_size_short, render_detail, row_url, truncate_str};
use harlens_common::Severity;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState,
        Table, TableState, Wrap,
    },
    Frame,
};

/// Draw the TUI
pub fn draw(frame: &mut Frame, app: &TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search box
            Constraint::Min(5),    // Entries or detail
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    draw_search_box(frame, app, chunks[0]);
    match (app.view, &app.error) {
        (_, Some(error)) => draw_error(frame, error, chunks[1]),
        (View::Table, None) => draw_entries(frame, app, chunks[1]),
        (View::Detail, None) => draw_detail(frame, app, chunks[1]),
    }
    draw_footer(frame, app.view, chunks[2]);
}

/// Draw the search box with the trace name as title
fn draw_search_box(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let text = Line::from(vec![
        Span::styled("Search: ", Style::default().fg(Color::DarkGray)),
        Span::styled(&app.search, Style::default().fg(Color::White)),
        Span::styled("_", Style::default().fg(Color::Cyan).add_modifier(Modifier::SLOW_BLINK)),
    ]);

    let block = Block::default()
        .title(format!(" {} ", app.source))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(text).block(block), area);
}

/// Draw the filtered entries with scrolling and scrollbar
fn draw_entries(frame: &mut Frame, app: &TuiApp, area: Rect) {
    // Fixed columns: method(7) + status(4) + duration(8) + size(8) + padding(~10)
    let fixed_width = 7 + 4 + 8 + 8 + 10;
    let url_width = (area.width as usize).saturating_sub(fixed_width).max(10);

    let header = Row::new(vec!["Method", "URL", "Stat", "Time", "Size"])
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .bottom_margin(0);

    let rows: Vec<Row> = app
        .rows
        .iter()
        .map(|row| {
            let entry = &row.entry;
            Row::new(vec![
                Cell::from(format!("{:>6}", truncate_str(&entry.request.method, 6))),
                Cell::from(truncate_str(&row_url(row), url_width)),
                Cell::from(entry.response.status.to_string()),
                Cell::from(format_duration_short(row.duration_ms())),
                Cell::from(format_size_short(entry.response.transfer_size)),
            ])
            .style(severity_style(row.severity()))
        })
        .collect();

    // Split area to leave room for scrollbar
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let title = if app.search.is_empty() {
        format!(" Entries ({}) ", app.rows.len())
    } else {
        format!(" Entries ({} of {} top-level) ", app.rows.len(), app.total_entries())
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(7),
            Constraint::Min(10),
            Constraint::Length(4),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .row_highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)));

    let mut state = TableState::default();
    if !app.rows.is_empty() {
        state.select(Some(app.selected_index));
    }

    frame.render_stateful_widget(table, chunks[0], &mut state);

    if !app.rows.is_empty() {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("▲"))
            .end_symbol(Some("▼"))
            .track_symbol(Some("│"))
            .thumb_symbol("█");

        let mut scrollbar_state = ScrollbarState::new(app.rows.len()).position(app.selected_index);

        frame.render_stateful_widget(scrollbar, chunks[1], &mut scrollbar_state);
    }
}

/// Draw the selected entry in full
fn draw_detail(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let Some(row) = app.selected() else {
        return;
    };

    let title = if row.is_batch_child_entry {
        " Batch Sub-call "
    } else {
        " Entry "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(severity_style(row.severity()));

    let paragraph = Paragraph::new(render_detail(row))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));

    frame.render_widget(paragraph, area);
}

/// Draw a failed inspection pass in place of the table
fn draw_error(frame: &mut Frame, error: &str, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Failed to expand batch requests",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(error, Style::default().fg(Color::White))),
    ];

    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Draw the footer with key hints
fn draw_footer(frame: &mut Frame, view: View, area: Rect) {
    let hints: &[(&str, &str)] = match view {
        View::Table => &[
            ("Type", " Search  "),
            ("Ctrl+U", " Clear  "),
            ("↑/↓", " Navigate  "),
            ("Enter", " Details  "),
            ("Ctrl+C", " Quit"),
        ],
        View::Detail => &[
            ("Esc", " Back  "),
            ("↑/↓", " Scroll  "),
            ("Ctrl+C", " Quit"),
        ],
    };

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(*key, Style::default().fg(Color::Cyan)),
                Span::styled(*label, Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Get row style for a severity
fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Normal => Style::default().fg(Color::White),
        Severity::Warning => Style::default().fg(Color::Yellow),
        Severity::Error => Style::default().fg(Color::Red),
    }
}
