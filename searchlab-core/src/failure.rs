//! Classification of non-2xx gateway responses.
//!
//! Failures are classified once, from the structured failure envelope when
//! the body carries one and from the raw text otherwise. Pages match on the
//! resulting [`FailureKind`] instead of inspecting message strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker the search backend puts in its error when the index is absent.
pub const INDEX_NOT_FOUND_MARKER: &str = "index_not_found_exception";

/// Alert shown whenever the catalog has not been indexed yet.
pub const INDEX_NOT_FOUND_ALERT: &str = "Index not found, please index the product catalog first";

/// `{ success: false, errorMessage, statusCode }` as returned by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureEnvelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(rename = "errorMessage", default)]
    pub error_message: Option<String>,
    #[serde(rename = "statusCode", default)]
    pub status_code: Option<StatusCode>,
}

/// `statusCode` arrives as either a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusCode {
    Number(u16),
    Text(String),
}

impl StatusCode {
    pub fn as_u16(&self) -> Option<u16> {
        match self {
            StatusCode::Number(code) => Some(*code),
            StatusCode::Text(text) => text.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    IndexNotFound,
    Backend { status: u16, message: String },
}

impl FailureKind {
    pub fn is_index_not_found(&self) -> bool {
        matches!(self, FailureKind::IndexNotFound)
    }

    /// Alert text for pages that report every failure as a missing index.
    pub fn catalog_alert(&self) -> String {
        INDEX_NOT_FOUND_ALERT.to_string()
    }

    /// Alert text for pages with their own generic prefix. A missing index
    /// still gets the tailored message.
    pub fn alert_with_prefix(&self, prefix: &str) -> String {
        match self {
            FailureKind::IndexNotFound => INDEX_NOT_FOUND_ALERT.to_string(),
            FailureKind::Backend { status, message } if message.is_empty() => {
                format!("{}: {}", prefix, status)
            }
            FailureKind::Backend { status, message } => {
                format!("{}: {} {}", prefix, status, message)
            }
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::IndexNotFound => f.write_str(INDEX_NOT_FOUND_ALERT),
            FailureKind::Backend { status, message } => {
                write!(f, "backend returned {}: {}", status, message)
            }
        }
    }
}

/// Classify a non-2xx response from its status and body text.
pub fn classify(status: u16, body: &str) -> FailureKind {
    let envelope = serde_json::from_str::<FailureEnvelope>(body).ok();
    let message = envelope
        .as_ref()
        .and_then(|e| e.error_message.clone())
        .unwrap_or_else(|| body.trim().to_string());

    if message.contains(INDEX_NOT_FOUND_MARKER) || body.contains(INDEX_NOT_FOUND_MARKER) {
        return FailureKind::IndexNotFound;
    }

    let status = envelope
        .as_ref()
        .and_then(|e| e.status_code.as_ref())
        .and_then(StatusCode::as_u16)
        .unwrap_or(status);

    FailureKind::Backend { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_marker() {
        let body = r#"{"success":false,"errorMessage":"[index_not_found_exception] no such index [products]","statusCode":"500"}"#;
        assert_eq!(classify(500, body), FailureKind::IndexNotFound);
    }

    #[test]
    fn test_raw_text_fallback() {
        let body = "Error: index_not_found_exception: no such index";
        assert!(classify(404, body).is_index_not_found());
    }

    #[test]
    fn test_envelope_status_overrides_http_status() {
        let body = r#"{"success":false,"errorMessage":"bad query","statusCode":"400"}"#;
        assert_eq!(
            classify(500, body),
            FailureKind::Backend {
                status: 400,
                message: "bad query".to_string()
            }
        );
    }

    #[test]
    fn test_numeric_status_code_keeps_message() {
        let body = r#"{"success":false,"errorMessage":"bad query","statusCode":400}"#;
        assert_eq!(
            classify(500, body),
            FailureKind::Backend {
                status: 400,
                message: "bad query".to_string()
            }
        );
    }

    #[test]
    fn test_unstructured_backend_failure() {
        let kind = classify(502, "Bad Gateway");
        assert_eq!(
            kind.alert_with_prefix("Error fetching search results"),
            "Error fetching search results: 502 Bad Gateway"
        );
        assert_eq!(kind.catalog_alert(), INDEX_NOT_FOUND_ALERT);
    }

    #[test]
    fn test_index_not_found_wins_over_prefix() {
        let kind = FailureKind::IndexNotFound;
        assert_eq!(kind.alert_with_prefix("Error fetching search results"), INDEX_NOT_FOUND_ALERT);
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(
            classify(503, "").alert_with_prefix("Error"),
            "Error: 503"
        );
    }
}
