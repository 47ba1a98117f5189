//! Status code severity used to highlight rows

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Warning,
    Error,
}

/// Client errors are warnings, server errors are errors, the rest is normal
pub fn status_severity(status: u16) -> Severity {
    match status {
        400..=499 => Severity::Warning,
        500.. => Severity::Error,
        _ => Severity::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_severity() {
        assert_eq!(status_severity(0), Severity::Normal);
        assert_eq!(status_severity(200), Severity::Normal);
        assert_eq!(status_severity(304), Severity::Normal);
        assert_eq!(status_severity(399), Severity::Normal);
        assert_eq!(status_severity(400), Severity::Warning);
        assert_eq!(status_severity(499), Severity::Warning);
        assert_eq!(status_severity(500), Severity::Error);
        assert_eq!(status_severity(599), Severity::Error);
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Warning).unwrap(),
            "\"warning\""
        );
    }
}
