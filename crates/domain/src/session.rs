//! Credentials passed explicitly into every backend call.

use std::fmt;

/// Bearer token issued by the session provider.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a token, ignoring surrounding whitespace. Blank input yields `None`.
    #[must_use]
    pub fn new(token: impl AsRef<str>) -> Option<Self> {
        let token = token.as_ref().trim();
        if token.is_empty() {
            None
        } else {
            Some(Self(token.to_string()))
        }
    }

    /// The raw token, for building an `Authorization` header or a cookie.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// Who is making a request. Anonymous credentials still produce requests;
/// the backend decides whether to reject them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    token: Option<BearerToken>,
}

impl Credentials {
    /// Credentials with no token.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Credentials carrying `token`.
    #[must_use]
    pub fn bearer(token: BearerToken) -> Self {
        Self { token: Some(token) }
    }

    #[must_use]
    pub fn token(&self) -> Option<&BearerToken> {
        self.token.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_reject_blank_token() {
        assert!(BearerToken::new("   ").is_none());
    }

    #[test]
    fn should_trim_token() {
        assert_eq!(BearerToken::new(" abc ").unwrap().expose(), "abc");
    }

    #[test]
    fn should_redact_token_in_debug_output() {
        let creds = Credentials::bearer(BearerToken::new("secret-token").unwrap());
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(creds.is_authenticated());
    }

    #[test]
    fn should_be_anonymous_by_default() {
        assert!(!Credentials::default().is_authenticated());
        assert!(Credentials::anonymous().token().is_none());
    }
}
