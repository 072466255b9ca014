//! Injected authentication session.
//!
//! Constructed once at startup and passed into the editor session and the
//! HTTP store explicitly; there is no ambient global. The collaborator
//! surface is deliberately small: a token for outgoing requests and an
//! `is_authenticated` signal the session consults before mutating actions.

use serde::Deserialize;
use std::env;

/// Signed-in user identity as reported by the auth backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Authentication state for one process lifetime.
#[derive(Debug, Clone, Default)]
pub struct AuthSession {
    token: Option<String>,
    user: Option<AuthUser>,
}

impl AuthSession {
    /// A session with no credentials.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session holding a bearer token.
    pub fn authenticated(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            user: None,
        }
    }

    /// A session holding a bearer token and the signed-in user.
    pub fn with_user(token: impl Into<String>, user: AuthUser) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    /// Build a session from `MARKPRESS_TOKEN`, anonymous when unset.
    pub fn from_env() -> Self {
        match env::var("MARKPRESS_TOKEN") {
            Ok(token) if !token.trim().is_empty() => Self::authenticated(token.trim().to_string()),
            _ => Self::anonymous(),
        }
    }

    /// Whether mutating operations may be attempted.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Bearer token for outgoing requests.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    /// Drop credentials at logout.
    pub fn sign_out(&mut self) {
        self.token = None;
        self.user = None;
    }
}

#[cfg(test)]
mod tests {
    use super::AuthSession;

    #[test]
    fn anonymous_session_is_not_authenticated() {
        assert!(!AuthSession::anonymous().is_authenticated());
    }

    #[test]
    fn sign_out_drops_the_token() {
        let mut session = AuthSession::authenticated("tok");
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok"));

        session.sign_out();
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }
}
