//! Building the filtered list of rows shown by the inspector

use crate::batch;
use crate::classifier::BatchClassifier;
use crate::error::InspectError;
use crate::har::Entry;
use crate::severity::{status_severity, Severity};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use url::Url;

/// A row of the inspector: a captured exchange or one sub-call of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectorEntry {
    #[serde(flatten)]
    pub entry: Entry,

    /// `true` when the row was reconstructed from a batch envelope
    pub is_batch_child_entry: bool,
}

impl InspectorEntry {
    /// Wrap an exchange taken directly from the trace
    pub fn top_level(entry: Entry) -> Self {
        Self {
            entry,
            is_batch_child_entry: false,
        }
    }

    /// Wrap an exchange synthesized from a batch sub-call
    pub fn batch_child(entry: Entry) -> Self {
        Self {
            entry,
            is_batch_child_entry: true,
        }
    }

    pub fn severity(&self) -> Severity {
        status_severity(self.entry.response.status)
    }

    /// URL as shown in the table; batch children drop their origin
    pub fn display_url(&self) -> Cow<'_, str> {
        let url = self.entry.request.url.as_str();
        if !self.is_batch_child_entry {
            return Cow::Borrowed(url);
        }

        match Url::parse(url) {
            Ok(parsed) => {
                let origin = parsed.origin().ascii_serialization();
                match url.get(..origin.len()) {
                    Some(prefix) if prefix.eq_ignore_ascii_case(&origin) => {
                        Cow::Borrowed(&url[origin.len()..])
                    }
                    _ => Cow::Owned(path_and_query(&parsed)),
                }
            }
            Err(_) => Cow::Borrowed(url),
        }
    }

    /// Elapsed time rounded to whole milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.entry.time.max(0.0).round() as u64
    }
}

fn path_and_query(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

/// A case-insensitive substring filter on request URLs.
/// The empty term matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm {
    needle: String,
}

impl SearchTerm {
    pub fn new(term: &str) -> Self {
        Self {
            needle: term.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, url: &str) -> bool {
        self.needle.is_empty() || url.to_lowercase().contains(&self.needle)
    }
}

/// Produce the rows to display for `entries` under `search`.
///
/// Each exchange is kept when its own URL matches, and is followed by the
/// batch sub-calls whose URLs match, whether or not the parent matched.
/// Any malformed batch aborts the whole pass.
pub fn filter_entries<C>(
    entries: &[Entry],
    search: &str,
    classifier: &C,
) -> Result<Vec<InspectorEntry>, InspectError>
where
    C: BatchClassifier + ?Sized,
{
    let search = SearchTerm::new(search);
    let mut rows = Vec::with_capacity(entries.len());

    for entry in entries {
        if search.matches(&entry.request.url) {
            rows.push(InspectorEntry::top_level(entry.clone()));
        }

        rows.extend(batch::expand_matching(entry, &search, classifier)?);
    }

    tracing::debug!(
        total = entries.len(),
        shown = rows.len(),
        "Filtered trace entries"
    );

    Ok(rows)
}
