//! Notice carried across a redirect in a short-lived cookie.
//!
//! The page the redirect lands on shows the notice once and clears the
//! cookie. Notices never travel in the URL, so a link cannot put text on a
//! dashboard page.

use axum::http::header::{InvalidHeaderValue, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Redirect, Response};
use url::form_urlencoded;

use karmandia_domain::notice::{Notice, NoticeLevel};

use crate::session::{ATTRIBUTES, cookie_value};

/// Name of the notice cookie.
pub const NOTICE_COOKIE: &str = "karmandia_notice";

/// Seconds a notice survives when the redirect is never followed.
const MAX_AGE_SECS: u32 = 60;

/// `Set-Cookie` value carrying `notice`.
///
/// # Errors
///
/// Fails when the encoded notice cannot appear in a header.
pub fn issue(notice: &Notice) -> Result<HeaderValue, InvalidHeaderValue> {
    let value = form_urlencoded::Serializer::new(String::new())
        .append_pair("level", notice.level.as_str())
        .append_pair("message", &notice.message)
        .finish();
    HeaderValue::try_from(format!(
        "{NOTICE_COOKIE}={value}; {ATTRIBUTES}; Max-Age={MAX_AGE_SECS}"
    ))
}

/// `Set-Cookie` value removing the notice.
#[must_use]
pub fn clear() -> HeaderValue {
    HeaderValue::from_static("karmandia_notice=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// `303 See Other` to `path`, carrying `notice` to the page it lands on.
pub fn redirect(path: &str, notice: Option<&Notice>) -> Response {
    let redirect = Redirect::to(path);
    match notice.map(issue) {
        Some(Ok(cookie)) => ([(SET_COOKIE, cookie)], redirect).into_response(),
        Some(Err(err)) => {
            tracing::warn!(error = %err, "notice cannot be stored in a cookie");
            redirect.into_response()
        }
        None => redirect.into_response(),
    }
}

/// The notice cookie of one request.
#[derive(Debug, Default)]
pub struct Flash {
    notice: Option<Notice>,
    present: bool,
}

impl Flash {
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let Some(value) = cookie_value(headers, NOTICE_COOKIE) else {
            return Self::default();
        };
        Self {
            notice: decode(value),
            present: true,
        }
    }

    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        self.notice.clone()
    }

    /// `page`, clearing the cookie when the request carried one.
    pub fn respond(self, page: impl IntoResponse) -> Response {
        if self.present {
            ([(SET_COOKIE, clear())], page).into_response()
        } else {
            page.into_response()
        }
    }
}

fn decode(value: &str) -> Option<Notice> {
    let mut level = None;
    let mut message = None;
    for (key, text) in form_urlencoded::parse(value.as_bytes()) {
        match key.as_ref() {
            "level" => level = Some(text.into_owned()),
            "message" => message = Some(text.into_owned()),
            _ => {}
        }
    }
    let message = message?;
    let message = message.trim();
    if message.is_empty() {
        return None;
    }
    Some(match level.as_deref() {
        Some(level) if level == NoticeLevel::Error.as_str() => Notice::error(message),
        _ => Notice::success(message),
    })
}
