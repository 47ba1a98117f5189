//! Text formatting shared by the table printer, detail view and TUI

use harlens_common::{Content, Cookie, Header, InspectorEntry, PostData, QueryParam};
use std::fmt::Write;

/// Indent that marks batch sub-calls in the URL column
const CHILD_PREFIX: &str = "    - ";

/// URL column text for a row
pub fn row_url(row: &InspectorEntry) -> String {
    if row.is_batch_child_entry {
        format!("{}{}", CHILD_PREFIX, row.display_url())
    } else {
        row.entry.request.url.clone()
    }
}

/// Format duration in ms (short version for tables)
pub fn format_duration_short(ms: u64) -> String {
    if ms >= 1000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        format!("{}ms", ms)
    }
}

/// Format size in bytes (short version for tables)
pub fn format_size_short(bytes: Option<i64>) -> String {
    let Some(bytes) = bytes.filter(|b| *b >= 0) else {
        return "-".to_string();
    };

    if bytes >= 1_000_000 {
        format!("{:.1}M", bytes as f64 / 1_000_000.0)
    } else if bytes >= 1_000 {
        format!("{:.1}K", bytes as f64 / 1_000.0)
    } else {
        format!("{}B", bytes)
    }
}

/// Truncate any string to max length (counted in chars)
pub fn truncate_str(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len <= max_len {
        return s.to_string();
    }

    if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Pretty-print a body when it holds JSON, otherwise return it as is
pub fn pretty_body(text: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| text.to_string()),
        Err(_) => text.to_string(),
    }
}

/// Full plain-text description of a row, used by `show` and the TUI
pub fn render_detail(row: &InspectorEntry) -> String {
    let entry = &row.entry;
    let mut out = String::new();

    let _ = writeln!(out, "{} {}", entry.request.method, entry.request.url);
    let _ = writeln!(
        out,
        "Status: {} {}   Duration: {}   Size: {}",
        entry.response.status,
        entry.response.status_text,
        format_duration_short(row.duration_ms()),
        format_size_short(entry.response.transfer_size),
    );
    if row.is_batch_child_entry {
        let _ = writeln!(out, "Batch sub-call");
    }

    write_pairs(&mut out, "Request Headers", &entry.request.headers);
    write_query(&mut out, &entry.request.query_string);
    write_cookies(&mut out, "Request Cookies", &entry.request.cookies);
    write_request_body(&mut out, entry.request.post_data.as_ref());

    write_pairs(&mut out, "Response Headers", &entry.response.headers);
    write_cookies(&mut out, "Response Cookies", &entry.response.cookies);
    write_response_body(&mut out, &entry.response.content);

    out
}

fn write_pairs(out: &mut String, title: &str, headers: &[Header]) {
    let _ = writeln!(out, "\n{} ({})", title, headers.len());
    for header in headers {
        let _ = writeln!(out, "  {}: {}", header.name, header.value);
    }
}

fn write_query(out: &mut String, params: &[QueryParam]) {
    if params.is_empty() {
        return;
    }
    let _ = writeln!(out, "\nQuery String ({})", params.len());
    for param in params {
        let _ = writeln!(out, "  {} = {}", param.name, param.value);
    }
}

fn write_cookies(out: &mut String, title: &str, cookies: &[Cookie]) {
    if cookies.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{} ({})", title, cookies.len());
    for cookie in cookies {
        let _ = writeln!(out, "  {}={}", cookie.name, cookie.value);
    }
}

fn write_request_body(out: &mut String, body: Option<&PostData>) {
    match body {
        Some(body) if !body.text.is_empty() => {
            let _ = writeln!(out, "\nRequest Body ({})", body.mime_type);
            write_indented(out, &pretty_body(&body.text));
        }
        _ => {
            let _ = writeln!(out, "\nRequest Body (empty)");
        }
    }
}

fn write_response_body(out: &mut String, content: &Content) {
    match content.decoded_text() {
        Ok(text) if !text.is_empty() => {
            let _ = writeln!(out, "\nResponse Body ({})", content.mime_type);
            write_indented(out, &pretty_body(&text));
        }
        Ok(_) => {
            let _ = writeln!(out, "\nResponse Body (empty)");
        }
        Err(e) => {
            let _ = writeln!(out, "\nResponse Body (undecodable: {})", e);
        }
    }
}

fn write_indented(out: &mut String, text: &str) {
    for line in text.lines() {
        let _ = writeln!(out, "  {}", line);
    }
}
