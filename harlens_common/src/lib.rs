//! Harlens Common - HAR trace model and batch request expansion
//!
//! This crate turns the exchanges of a HAR trace into the rows shown by the
//! inspector. Batch calls, whose bodies carry several sub-requests and
//! sub-responses as JSON, are expanded into one synthetic row per sub-call.
//! A single search term filters parents and sub-calls independently.

pub mod batch;
pub mod classifier;
pub mod envelope;
pub mod error;
pub mod har;
pub mod inspector;
pub mod severity;
pub mod trace;

pub use batch::{expand, headers_from_map, resolve_sub_call_url};
pub use classifier::{BatchClassifier, PathClassifier};
pub use envelope::{BatchRequest, BatchResponse, SubRequest, SubResponse};
pub use error::{EnvelopeSide, InspectError, TraceError};
pub use har::{Content, Cookie, Entry, Header, Log, PostData, QueryParam, Request, Response};
pub use inspector::{filter_entries, InspectorEntry, SearchTerm};
pub use severity::{status_severity, Severity};
pub use trace::Trace;
