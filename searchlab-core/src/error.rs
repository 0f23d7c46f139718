//! Error types for searchlab operations

use thiserror::Error;

/// Form validation failures raised before any request is sent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Search term must be at least {min} characters long")]
    TermTooShort { min: usize },

    #[error("Please enter a search term")]
    EmptyTerm,

    /// The form is not ready yet; the page stays quiet and sends nothing.
    #[error("Search input incomplete: {reason}")]
    Incomplete { reason: &'static str },

    #[error("Invalid value for {field}: {value:?} is not a number")]
    InvalidNumber { field: &'static str, value: String },
}

impl QueryError {
    /// Silent errors abort the submission without raising an alert.
    pub fn is_silent(&self) -> bool {
        matches!(self, QueryError::Incomplete { .. })
    }

    /// Length checks are shown as warnings; everything else is an error.
    pub fn is_warning(&self) -> bool {
        matches!(self, QueryError::TermTooShort { .. })
    }
}

/// Session construction errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("ID token must not be empty")]
    MissingToken,
}

/// Product upload errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("No file selected")]
    MissingFile,

    #[error("File name {0:?} has no alphanumeric characters")]
    EmptyFileName(String),

    #[error("Presigned upload is missing the object key")]
    MissingKey,

    #[error("Object key {0:?} has no file segment")]
    MalformedKey(String),

    #[error("Invalid price {0:?}")]
    InvalidPrice(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_too_short_message() {
        let err = QueryError::TermTooShort { min: 3 };
        assert_eq!(err.to_string(), "Search term must be at least 3 characters long");
        assert!(err.is_warning());
        assert!(!err.is_silent());
    }

    #[test]
    fn test_incomplete_is_silent() {
        let err = QueryError::Incomplete { reason: "empty term" };
        assert!(err.is_silent());
        assert!(!err.is_warning());
    }
}
