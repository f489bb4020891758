//! Authentication primitives shared across the UI.
//!
//! # Design
//! - Keep auth state as simple data so callers can store/clear it without side effects.
//! - Treat empty credentials as unauthenticated at the call site.
//! - Leave storage access to transport clients to keep core DOM-free.

/// Local storage key holding the session token issued at login.
pub const TOKEN_STORAGE_KEY: &str = "access_token";

/// Default route of the login page.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Active authentication state for outbound requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthState {
    /// Bearer token authentication.
    Bearer(String),
    /// No usable token; requests go out without credentials.
    Anonymous,
}

impl AuthState {
    /// Build the state from a raw stored token.
    #[must_use]
    pub fn from_stored(token: Option<String>) -> Self {
        match token {
            Some(token) if !token.trim().is_empty() => Self::Bearer(token.trim().to_string()),
            _ => Self::Anonymous,
        }
    }

    /// Value for the `Authorization` header, if any.
    #[must_use]
    pub fn authorization_header(&self) -> Option<String> {
        match self {
            Self::Bearer(token) => Some(format!("Bearer {token}")),
            Self::Anonymous => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AuthState;

    #[test]
    fn blank_tokens_are_anonymous() {
        assert_eq!(AuthState::from_stored(None), AuthState::Anonymous);
        assert_eq!(
            AuthState::from_stored(Some("   ".to_string())),
            AuthState::Anonymous
        );
        assert_eq!(AuthState::from_stored(None).authorization_header(), None);
    }

    #[test]
    fn bearer_header_uses_trimmed_token() {
        let state = AuthState::from_stored(Some(" abc.def ".to_string()));
        assert_eq!(
            state.authorization_header().as_deref(),
            Some("Bearer abc.def")
        );
        assert_eq!(AuthState::Anonymous.authorization_header(), None);
    }
}
