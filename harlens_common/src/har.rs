//! HAR (HTTP Archive) document model
//!
//! Only the parts of the HAR 1.2 schema the inspector reads are modelled.
//! Unknown fields are ignored and missing collections default to empty.

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;

/// The `log` object of a HAR document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Log {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<Creator>,

    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// Application that produced the trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub name: String,
    #[serde(default)]
    pub version: String,
}

/// One captured HTTP exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// `None` when absent or not an RFC 3339 timestamp
    #[serde(
        default,
        deserialize_with = "lenient_date_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub started_date_time: Option<DateTime<FixedOffset>>,

    pub request: Request,

    pub response: Response,

    /// Total elapsed time in milliseconds
    #[serde(default)]
    pub time: f64,
}

/// Exporters write naive or empty timestamps; those must not reject the trace
fn lenient_date_time<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub method: String,

    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_version: Option<String>,

    #[serde(default)]
    pub headers: Vec<Header>,

    #[serde(default)]
    pub query_string: Vec<QueryParam>,

    #[serde(default)]
    pub cookies: Vec<Cookie>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_data: Option<PostData>,
}

impl Request {
    /// Body text, if the request carries a non-empty one
    pub fn body_text(&self) -> Option<&str> {
        self.post_data
            .as_ref()
            .map(|data| data.text.as_str())
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status: u16,

    #[serde(default)]
    pub status_text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_version: Option<String>,

    #[serde(default)]
    pub headers: Vec<Header>,

    #[serde(default)]
    pub cookies: Vec<Cookie>,

    #[serde(default)]
    pub content: Content,

    /// Bytes on the wire, as recorded by Chromium-based browsers
    #[serde(
        rename = "_transferSize",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transfer_size: Option<i64>,
}

/// An HTTP header as an ordered name/value pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    pub name: String,

    pub value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_only: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
}

/// Request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    #[serde(default)]
    pub mime_type: String,

    #[serde(default)]
    pub text: String,
}

/// Response body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,

    #[serde(default)]
    pub mime_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Set to `base64` when `text` holds encoded bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

impl Content {
    /// Body text with any base64 encoding removed. Missing text is empty.
    pub fn decoded_text(&self) -> Result<Cow<'_, str>, base64::DecodeError> {
        let text = self.text.as_deref().unwrap_or_default();

        match self.encoding.as_deref() {
            Some(encoding) if encoding.eq_ignore_ascii_case("base64") => {
                let bytes = STANDARD.decode(text.trim())?;
                Ok(Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()))
            }
            _ => Ok(Cow::Borrowed(text)),
        }
    }
}
