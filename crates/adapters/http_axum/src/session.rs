//! Session cookie carrying the bearer token.

use axum::http::header::{COOKIE, InvalidHeaderValue};
use axum::http::{HeaderMap, HeaderValue};

use karmandia_domain::session::{BearerToken, Credentials};

/// Default name of the session cookie.
pub const DEFAULT_COOKIE_NAME: &str = "karmandia_session";

pub(crate) const ATTRIBUTES: &str = "Path=/; HttpOnly; SameSite=Lax";

/// Reads and writes the cookie holding the bearer token.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
}

impl Default for SessionCookie {
    fn default() -> Self {
        Self::new(DEFAULT_COOKIE_NAME)
    }
}

impl SessionCookie {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Credentials of the request. A missing or blank cookie yields
    /// anonymous credentials.
    #[must_use]
    pub fn credentials(&self, headers: &HeaderMap) -> Credentials {
        cookie_value(headers, &self.name)
            .and_then(|value| BearerToken::new(value.trim_matches('"')))
            .map_or_else(Credentials::anonymous, Credentials::bearer)
    }

    /// `Set-Cookie` value storing `token`.
    ///
    /// # Errors
    ///
    /// Fails when the cookie name or token cannot appear in a header.
    pub fn issue(&self, token: &BearerToken) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::try_from(format!("{}={}; {ATTRIBUTES}", self.name, token.expose()))
    }

    /// `Set-Cookie` value removing the session.
    ///
    /// # Errors
    ///
    /// Fails when the cookie name cannot appear in a header.
    pub fn expire(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::try_from(format!("{}=; {ATTRIBUTES}; Max-Age=0", self.name))
    }
}

/// Value of the first cookie called `name` in the request.
pub(crate) fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(found, _)| *found == name)
        .map(|(_, value)| value)
}

/// Whether `token` can be stored as a cookie value without quoting.
#[must_use]
pub fn is_cookie_safe(token: &str) -> bool {
    !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_graphic() && !matches!(b, b'"' | b',' | b';' | b'\\'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn should_be_anonymous_without_cookie() {
        let cookie = SessionCookie::default();
        assert!(!cookie.credentials(&HeaderMap::new()).is_authenticated());
    }

    #[test]
    fn should_read_token_among_other_cookies() {
        let cookie = SessionCookie::default();
        let credentials = cookie.credentials(&headers("theme=dark; karmandia_session=abc.def; x=1"));
        assert_eq!(credentials.token().map(BearerToken::expose), Some("abc.def"));
    }

    #[test]
    fn should_ignore_blank_token() {
        let cookie = SessionCookie::default();
        assert!(!cookie.credentials(&headers("karmandia_session=")).is_authenticated());
    }

    #[test]
    fn should_not_match_cookie_name_prefix() {
        let cookie = SessionCookie::new("sid");
        assert!(!cookie.credentials(&headers("sid_old=abc")).is_authenticated());
    }

    #[test]
    fn should_issue_http_only_cookie() {
        let cookie = SessionCookie::default();
        let value = cookie.issue(&BearerToken::new("t0k").unwrap()).unwrap();
        let value = value.to_str().unwrap();
        assert!(value.starts_with("karmandia_session=t0k;"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Lax"));
    }

    #[test]
    fn should_expire_cookie() {
        let value = SessionCookie::default().expire().unwrap();
        assert!(value.to_str().unwrap().contains("Max-Age=0"));
    }

    #[test]
    fn should_reject_tokens_with_separators() {
        assert!(is_cookie_safe("eyJhbGciOi.J9-_x"));
        assert!(!is_cookie_safe("a;b"));
        assert!(!is_cookie_safe("a b"));
        assert!(!is_cookie_safe(""));
    }
}
