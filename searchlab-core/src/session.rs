//! Signed-in session passed to every gateway call.

use crate::error::SessionError;
use std::fmt;

/// Immutable credentials for one signed-in user.
///
/// The token is forwarded verbatim as the `Authorization` header. It is
/// obtained by the identity provider, never by this crate.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    id_token: String,
    identity: String,
}

impl Session {
    pub fn new(
        id_token: impl Into<String>,
        identity: impl Into<String>,
    ) -> Result<Self, SessionError> {
        let id_token = id_token.into();
        if id_token.trim().is_empty() {
            return Err(SessionError::MissingToken);
        }
        Ok(Self {
            id_token,
            identity: identity.into(),
        })
    }

    pub fn id_token(&self) -> &str {
        &self.id_token
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id_token", &"<redacted>")
            .field("identity", &self.identity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_rejected() {
        assert_eq!(
            Session::new("   ", "ana").unwrap_err(),
            SessionError::MissingToken
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::new("eyJhbGciOi.secret", "ana@example.com").unwrap();
        let rendered = format!("{:?}", session);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("ana@example.com"));
    }
}
