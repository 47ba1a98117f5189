//! Recognizing requests sent to a batch endpoint

use crate::har::Request;
use url::Url;

/// Default HTTP method of batch calls
pub const DEFAULT_BATCH_METHOD: &str = "POST";

/// Default path suffix of batch endpoints
pub const DEFAULT_BATCH_PATH_SUFFIX: &str = "/batch";

/// Decides whether a captured request targets a batch endpoint
pub trait BatchClassifier {
    fn is_batch_request(&self, request: &Request) -> bool;
}

impl<F> BatchClassifier for F
where
    F: Fn(&Request) -> bool,
{
    fn is_batch_request(&self, request: &Request) -> bool {
        self(request)
    }
}

/// Matches batch endpoints by HTTP method and URL path suffix.
///
/// Both comparisons ignore ASCII case, the query string is ignored and a
/// trailing slash on the path does not matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathClassifier {
    methods: Vec<String>,
    path_suffixes: Vec<String>,
}

impl PathClassifier {
    pub fn new<M, P>(methods: M, path_suffixes: P) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            methods: methods.into_iter().map(Into::into).collect(),
            path_suffixes: path_suffixes
                .into_iter()
                .map(|suffix| {
                    let suffix: String = suffix.into();
                    suffix.trim_end_matches('/').to_ascii_lowercase()
                })
                .filter(|suffix| !suffix.is_empty())
                .collect(),
        }
    }

    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    pub fn path_suffixes(&self) -> &[String] {
        &self.path_suffixes
    }
}

impl Default for PathClassifier {
    fn default() -> Self {
        Self::new([DEFAULT_BATCH_METHOD], [DEFAULT_BATCH_PATH_SUFFIX])
    }
}

impl BatchClassifier for PathClassifier {
    fn is_batch_request(&self, request: &Request) -> bool {
        let method_matches = self
            .methods
            .iter()
            .any(|method| method.eq_ignore_ascii_case(&request.method));
        if !method_matches {
            return false;
        }

        let path = url_path(&request.url);
        let path = path.trim_end_matches('/').to_ascii_lowercase();

        self.path_suffixes
            .iter()
            .any(|suffix| path.ends_with(suffix.as_str()))
    }
}

/// Path component of a request URL, tolerating URLs the parser rejects
fn url_path(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => url.path().to_string(),
        Err(_) => raw
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}
