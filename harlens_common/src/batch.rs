//! Expanding batch exchanges into one synthetic exchange per sub-call

use crate::classifier::BatchClassifier;
use crate::envelope::{BatchRequest, BatchResponse, SubRequest, SubResponse};
use crate::error::InspectError;
use crate::har::{Content, Entry, Header, PostData, Request, Response};
use crate::inspector::{InspectorEntry, SearchTerm};
use serde_json::{Map, Value};
use url::Url;

/// Mime type given to synthesized request and response bodies
pub const SUB_CALL_MIME_TYPE: &str = "application/json";

/// Expand `entry` into the sub-calls whose URLs match `search`.
///
/// Returns an empty list when the entry is not a batch call (the classifier
/// rejects it or its request has no body). Sub-calls keep envelope order.
pub fn expand<C>(
    entry: &Entry,
    search: &str,
    classifier: &C,
) -> Result<Vec<InspectorEntry>, InspectError>
where
    C: BatchClassifier + ?Sized,
{
    expand_matching(entry, &SearchTerm::new(search), classifier)
}

pub(crate) fn expand_matching<C>(
    entry: &Entry,
    search: &SearchTerm,
    classifier: &C,
) -> Result<Vec<InspectorEntry>, InspectError>
where
    C: BatchClassifier + ?Sized,
{
    if !classifier.is_batch_request(&entry.request) {
        return Ok(Vec::new());
    }
    let Some(body) = entry.request.body_text() else {
        return Ok(Vec::new());
    };

    let batch_request = BatchRequest::from_json(body)?;
    let batch_response = BatchResponse::from_json(&entry.response.content.decoded_text()?)?;

    if batch_request.requests.len() != batch_response.responses.len() {
        return Err(InspectError::LengthMismatch {
            requests: batch_request.requests.len(),
            responses: batch_response.responses.len(),
        });
    }

    let mut children = Vec::new();
    for (sub_request, sub_response) in batch_request
        .requests
        .iter()
        .zip(&batch_response.responses)
    {
        if !search.matches(&sub_request.url) {
            continue;
        }

        let url = resolve_sub_call_url(&sub_request.url, &entry.request.url)?;
        children.push(InspectorEntry::batch_child(synthesize(
            url,
            sub_request,
            sub_response,
        )));
    }

    tracing::debug!(
        url = %entry.request.url,
        sub_calls = batch_request.requests.len(),
        matched = children.len(),
        "Expanded batch entry"
    );

    Ok(children)
}

/// Resolve a sub-call URL against the origin of the batch request.
///
/// `http://` and `https://` URLs are returned unchanged, protocol-relative
/// URLs take the parent's scheme, anything else is treated as a path on the
/// parent's scheme, host and port.
pub fn resolve_sub_call_url(url: &str, parent_url: &str) -> Result<String, InspectError> {
    if has_http_scheme(url) {
        return Ok(url.to_string());
    }

    let parent = Url::parse(parent_url).map_err(|source| InspectError::InvalidParentUrl {
        url: parent_url.to_string(),
        source,
    })?;

    if url.starts_with("//") {
        return Ok(format!("{}:{}", parent.scheme(), url));
    }

    let host = parent.host_str().ok_or_else(|| InspectError::MissingHost {
        url: parent_url.to_string(),
    })?;

    let mut resolved = format!("{}://{}", parent.scheme(), host);
    if let Some(port) = parent.port() {
        resolved.push_str(&format!(":{}", port));
    }
    if !url.starts_with('/') {
        resolved.push('/');
    }
    resolved.push_str(url);

    Ok(resolved)
}

fn has_http_scheme(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Convert an envelope header map into ordered name/value pairs
pub fn headers_from_map(map: &Map<String, Value>) -> Vec<Header> {
    map.iter()
        .map(|(name, value)| {
            let value = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            Header::new(name.as_str(), value)
        })
        .collect()
}

fn synthesize(url: String, sub_request: &SubRequest, sub_response: &SubResponse) -> Entry {
    Entry {
        started_date_time: None,
        request: Request {
            method: sub_request.http_method.clone(),
            url,
            http_version: None,
            headers: headers_from_map(&sub_request.request_header_details),
            query_string: Vec::new(),
            cookies: Vec::new(),
            post_data: Some(PostData {
                mime_type: SUB_CALL_MIME_TYPE.to_string(),
                text: sub_request.content.to_string(),
            }),
        },
        response: Response {
            status: sub_response.http_status_code,
            status_text: String::new(),
            http_version: None,
            headers: headers_from_map(&sub_response.headers),
            cookies: Vec::new(),
            content: Content {
                size: None,
                mime_type: SUB_CALL_MIME_TYPE.to_string(),
                text: Some(sub_response.content.to_string()),
                encoding: None,
            },
            transfer_size: Some(sub_response.content_length),
        },
        time: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::PathClassifier;
    use crate::error::EnvelopeSide;
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde_json::json;

    fn batch(parent_url: &str, request_body: Value, response_body: Value) -> Entry {
        Entry {
            started_date_time: None,
            request: Request {
                method: "POST".to_string(),
                url: parent_url.to_string(),
                http_version: Some("HTTP/1.1".to_string()),
                headers: vec![Header::new("Content-Type", "application/json")],
                query_string: vec![],
                cookies: vec![],
                post_data: Some(PostData {
                    mime_type: "application/json".to_string(),
                    text: request_body.to_string(),
                }),
            },
            response: Response {
                status: 200,
                status_text: "OK".to_string(),
                http_version: None,
                headers: vec![],
                cookies: vec![],
                content: Content {
                    size: None,
                    mime_type: "application/json".to_string(),
                    text: Some(response_body.to_string()),
                    encoding: None,
                },
                transfer_size: Some(1024),
            },
            time: 180.0,
        }
    }

    fn two_call_batch() -> Entry {
        batch(
            "https://api.example.com/batch",
            json!({"requests": [
                {
                    "url": "/v2/users/5",
                    "httpMethod": "GET",
                    "requestHeaderDetails": {"Content-Type": "application/json", "X-Trace": "abc"},
                    "content": null
                },
                {
                    "url": "https://other.example.com/x",
                    "httpMethod": "PATCH",
                    "requestHeaderDetails": {},
                    "content": {"name": "new"}
                }
            ]}),
            json!({"responses": [
                {
                    "httpStatusCode": 200,
                    "headers": {"ETag": "\"1\"", "Cache-Control": "no-cache"},
                    "content": {"id": 5, "name": "x"},
                    "contentLength": 21
                },
                {
                    "httpStatusCode": 409,
                    "headers": {},
                    "content": {"error": {"code": "Conflict"}},
                    "contentLength": 31
                }
            ]}),
        )
    }

    #[test]
    fn test_expand_synthesizes_sub_calls() {
        let children = expand(&two_call_batch(), "", &PathClassifier::default()).unwrap();
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|child| child.is_batch_child_entry));

        let first = &children[0].entry;
        assert_eq!(first.request.method, "GET");
        assert_eq!(first.request.url, "https://api.example.com/v2/users/5");
        assert!(first.request.query_string.is_empty());
        assert!(first.request.cookies.is_empty());
        assert_eq!(first.response.status, 200);
        assert_eq!(first.response.status_text, "");
        assert_eq!(first.response.transfer_size, Some(21));
        assert_eq!(first.response.content.mime_type, SUB_CALL_MIME_TYPE);
        assert_eq!(first.time, 0.0);

        let second = &children[1].entry;
        assert_eq!(second.request.method, "PATCH");
        assert_eq!(second.request.url, "https://other.example.com/x");
        assert_eq!(second.response.status, 409);
    }

    #[test]
    fn test_headers_keep_insertion_order() {
        let children = expand(&two_call_batch(), "", &PathClassifier::default()).unwrap();

        assert_eq!(
            children[0].entry.request.headers,
            vec![
                Header::new("Content-Type", "application/json"),
                Header::new("X-Trace", "abc"),
            ]
        );
        assert_eq!(
            children[0].entry.response.headers,
            vec![
                Header::new("ETag", "\"1\""),
                Header::new("Cache-Control", "no-cache"),
            ]
        );
        assert!(children[1].entry.response.headers.is_empty());
    }

    #[test]
    fn test_non_string_header_values() {
        let map = json!({"Retry-After": 30, "X-Flag": true});
        let headers = headers_from_map(map.as_object().unwrap());
        assert_eq!(
            headers,
            vec![Header::new("Retry-After", "30"), Header::new("X-Flag", "true")]
        );
    }

    #[test]
    fn test_content_round_trips_through_body_text() {
        let children = expand(&two_call_batch(), "", &PathClassifier::default()).unwrap();

        let response_text = children[0].entry.response.content.text.as_deref().unwrap();
        let parsed: Value = serde_json::from_str(response_text).unwrap();
        assert_eq!(parsed, json!({"id": 5, "name": "x"}));

        let request_body = children[1].entry.request.post_data.as_ref().unwrap();
        assert_eq!(request_body.mime_type, SUB_CALL_MIME_TYPE);
        assert_eq!(
            serde_json::from_str::<Value>(&request_body.text).unwrap(),
            json!({"name": "new"})
        );
    }

    #[test]
    fn test_search_filters_sub_calls() {
        let classifier = PathClassifier::default();

        let children = expand(&two_call_batch(), "OTHER.example", &classifier).unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].entry.request.url, "https://other.example.com/x");

        // The search applies to the URL as written in the envelope
        let children = expand(&two_call_batch(), "api.example.com", &classifier).unwrap();
        assert!(children.is_empty());
    }

    #[test]
    fn test_not_a_batch_request() {
        let mut entry = two_call_batch();
        entry.request.url = "https://api.example.com/users".to_string();
        assert!(expand(&entry, "", &PathClassifier::default()).unwrap().is_empty());

        let mut entry = two_call_batch();
        entry.request.post_data = None;
        assert!(expand(&entry, "", &PathClassifier::default()).unwrap().is_empty());

        let never = |_: &Request| false;
        assert!(expand(&two_call_batch(), "", &never).unwrap().is_empty());
    }

    #[test]
    fn test_length_mismatch_is_fatal() {
        let entry = batch(
            "https://api.x.com/batch",
            json!({"requests": [
                {"url": "/a", "httpMethod": "GET"},
                {"url": "/b", "httpMethod": "GET"}
            ]}),
            json!({"responses": [{"httpStatusCode": 200}]}),
        );

        let err = expand(&entry, "", &PathClassifier::default()).unwrap_err();
        assert!(matches!(
            err,
            InspectError::LengthMismatch {
                requests: 2,
                responses: 1
            }
        ));
    }

    #[test]
    fn test_malformed_response_is_fatal() {
        let mut entry = two_call_batch();
        entry.response.content.text = Some("<html>502</html>".to_string());

        let err = expand(&entry, "", &PathClassifier::default()).unwrap_err();
        assert!(matches!(
            err,
            InspectError::MalformedEnvelope {
                side: EnvelopeSide::Response,
                ..
            }
        ));

        entry.response.content.text = None;
        assert!(expand(&entry, "", &PathClassifier::default()).is_err());
    }

    #[test]
    fn test_base64_response_content() {
        let mut entry = two_call_batch();
        let text = entry.response.content.text.take().unwrap();
        entry.response.content.text = Some(STANDARD.encode(text));
        entry.response.content.encoding = Some("base64".to_string());

        let children = expand(&entry, "", &PathClassifier::default()).unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[1].entry.response.status, 409);
    }

    #[test]
    fn test_resolve_sub_call_url() {
        let parent = "https://api.example.com/batch?api-version=1";

        assert_eq!(
            resolve_sub_call_url("/v2/users/5", parent).unwrap(),
            "https://api.example.com/v2/users/5"
        );
        assert_eq!(
            resolve_sub_call_url("https://other.example.com/x", parent).unwrap(),
            "https://other.example.com/x"
        );
        assert_eq!(
            resolve_sub_call_url("HTTP://other.example.com/x", parent).unwrap(),
            "HTTP://other.example.com/x"
        );
        assert_eq!(
            resolve_sub_call_url("//cdn.example.com/a.js", parent).unwrap(),
            "https://cdn.example.com/a.js"
        );
        assert_eq!(
            resolve_sub_call_url("v2/users", parent).unwrap(),
            "https://api.example.com/v2/users"
        );
        assert_eq!(
            resolve_sub_call_url("/a", "http://localhost:8080/batch").unwrap(),
            "http://localhost:8080/a"
        );
        assert_eq!(
            resolve_sub_call_url("/a", "https://api.example.com:443/batch").unwrap(),
            "https://api.example.com/a"
        );
    }

    #[test]
    fn test_resolve_with_bad_parent() {
        let err = resolve_sub_call_url("/a", "not a url").unwrap_err();
        assert!(matches!(err, InspectError::InvalidParentUrl { .. }));

        // Absolute URLs never look at the parent
        assert!(resolve_sub_call_url("https://x.com/a", "not a url").is_ok());
    }

    #[test]
    fn test_resolve_with_hostless_parent() {
        let err = resolve_sub_call_url("/a", "mailto:ops@example.com").unwrap_err();
        assert!(matches!(err, InspectError::MissingHost { .. }));
    }

    #[test]
    fn test_invalid_base64_response_is_fatal() {
        let mut entry = two_call_batch();
        entry.response.content.text = Some("!!not base64!!".to_string());
        entry.response.content.encoding = Some("base64".to_string());

        let err = expand(&entry, "", &PathClassifier::default()).unwrap_err();
        assert!(matches!(err, InspectError::InvalidEncoding(_)));
    }

    #[test]
    fn test_relative_url_under_unparseable_parent_aborts() {
        let entry = batch(
            "/batch",
            json!({"requests": [{"url": "/a", "httpMethod": "GET"}]}),
            json!({"responses": [{"httpStatusCode": 200}]}),
        );

        let err = expand(&entry, "", &PathClassifier::default()).unwrap_err();
        assert!(matches!(err, InspectError::InvalidParentUrl { .. }));
    }
}
