//! Errors raised while loading and inspecting traces

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which half of a batch exchange an envelope came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeSide {
    Request,
    Response,
}

impl fmt::Display for EnvelopeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvelopeSide::Request => write!(f, "request"),
            EnvelopeSide::Response => write!(f, "response"),
        }
    }
}

/// Errors that abort an inspection pass
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("Malformed batch envelope in {side} body: {source}")]
    MalformedEnvelope {
        side: EnvelopeSide,
        #[source]
        source: serde_json::Error,
    },

    #[error("Batch response body is not valid base64: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("Batch envelope has {requests} sub-requests but {responses} sub-responses")]
    LengthMismatch { requests: usize, responses: usize },

    #[error("Invalid parent request URL {url:?}: {source}")]
    InvalidParentUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Parent request URL {url:?} has no host")]
    MissingHost { url: String },
}

/// Errors raised while loading a HAR document
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("Failed to read trace file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse HAR document: {0}")]
    Parse(#[from] serde_json::Error),
}
