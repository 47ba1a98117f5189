//! Batch envelope payloads carried inside a single HTTP exchange
//!
//! A batch request body lists sub-requests; the matching response body lists
//! sub-responses in the same order. Header maps keep their insertion order.

use crate::error::{EnvelopeSide, InspectError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request body of a batch call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub requests: Vec<SubRequest>,
}

/// Response body of a batch call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
    pub responses: Vec<SubResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubRequest {
    /// Absolute URL, or a path relative to the batch endpoint's origin
    pub url: String,

    pub http_method: String,

    #[serde(default)]
    pub request_header_details: Map<String, Value>,

    #[serde(default)]
    pub content: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubResponse {
    pub http_status_code: u16,

    #[serde(default)]
    pub headers: Map<String, Value>,

    #[serde(default)]
    pub content: Value,

    #[serde(default)]
    pub content_length: i64,
}

impl BatchRequest {
    pub fn from_json(text: &str) -> Result<Self, InspectError> {
        serde_json::from_str(text).map_err(|source| InspectError::MalformedEnvelope {
            side: EnvelopeSide::Request,
            source,
        })
    }
}

impl BatchResponse {
    pub fn from_json(text: &str) -> Result<Self, InspectError> {
        serde_json::from_str(text).map_err(|source| InspectError::MalformedEnvelope {
            side: EnvelopeSide::Response,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_request_decode() {
        let json = r#"{"requests": [
            {
                "url": "/subscriptions/1/resourceGroups?api-version=2020-01-01",
                "httpMethod": "GET",
                "requestHeaderDetails": {"x-ms-client-request-id": "abc", "Accept": "*/*"},
                "content": null
            },
            {"url": "https://other.example.com/x", "httpMethod": "PUT", "content": {"a": 1}}
        ]}"#;

        let batch = BatchRequest::from_json(json).unwrap();
        assert_eq!(batch.requests.len(), 2);
        assert_eq!(batch.requests[0].http_method, "GET");

        let keys: Vec<&String> = batch.requests[0].request_header_details.keys().collect();
        assert_eq!(keys, vec!["x-ms-client-request-id", "Accept"]);

        assert!(batch.requests[1].request_header_details.is_empty());
        assert_eq!(batch.requests[1].content["a"], 1);
    }

    #[test]
    fn test_batch_response_defaults() {
        let json = r#"{"responses": [{"httpStatusCode": 204}]}"#;

        let batch = BatchResponse::from_json(json).unwrap();
        assert_eq!(batch.responses[0].http_status_code, 204);
        assert!(batch.responses[0].headers.is_empty());
        assert_eq!(batch.responses[0].content, Value::Null);
        assert_eq!(batch.responses[0].content_length, 0);
    }

    #[test]
    fn test_invalid_json_names_side() {
        let err = BatchRequest::from_json("{not json").unwrap_err();
        assert!(matches!(
            err,
            InspectError::MalformedEnvelope {
                side: EnvelopeSide::Request,
                ..
            }
        ));

        let err = BatchResponse::from_json("").unwrap_err();
        assert!(err.to_string().contains("response body"));
    }

    #[test]
    fn test_missing_required_field_is_malformed() {
        let err = BatchRequest::from_json(r#"{"requests": [{"url": "/a"}]}"#).unwrap_err();
        assert!(matches!(err, InspectError::MalformedEnvelope { .. }));

        let err = BatchResponse::from_json(r#"{"value": []}"#).unwrap_err();
        assert!(matches!(err, InspectError::MalformedEnvelope { .. }));
    }
}
