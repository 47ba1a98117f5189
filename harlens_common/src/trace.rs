//! Loading HAR documents

use crate::classifier::BatchClassifier;
use crate::error::{InspectError, TraceError};
use crate::har::{Entry, Log};
use crate::inspector::{filter_entries, InspectorEntry};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A loaded HAR document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub log: Log,
}

impl Trace {
    pub fn from_json(s: &str) -> Result<Self, TraceError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read and parse a `.har` file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| TraceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let trace = Self::from_json(&content)?;
        tracing::info!(
            path = %path.display(),
            entries = trace.log.entries.len(),
            "Loaded trace"
        );

        Ok(trace)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.log.entries
    }

    /// Rows to display for this trace under `search`
    pub fn inspect<C>(&self, search: &str, classifier: &C) -> Result<Vec<InspectorEntry>, InspectError>
    where
        C: BatchClassifier + ?Sized,
    {
        filter_entries(self.entries(), search, classifier)
    }
}
