//! HTTP error response mapping.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use karmandia_domain::error::{InvalidIdError, KarmandiaError};

/// Failure of a dashboard page, rendered as a short plain-text response.
#[derive(Debug)]
pub enum PageError {
    /// A record id in the path or query was malformed.
    InvalidId(InvalidIdError),
    /// The request body could not be read.
    BadRequest(String),
    NotFound,
    /// The backend failed in a way the page cannot present inline.
    Backend(KarmandiaError),
    Internal(&'static str),
}

impl From<InvalidIdError> for PageError {
    fn from(err: InvalidIdError) -> Self {
        Self::InvalidId(err)
    }
}

impl From<KarmandiaError> for PageError {
    fn from(err: KarmandiaError) -> Self {
        match err {
            KarmandiaError::InvalidId(err) => Self::InvalidId(err),
            other => Self::Backend(other),
        }
    }
}

impl From<MultipartError> for PageError {
    fn from(err: MultipartError) -> Self {
        Self::BadRequest(err.body_text())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidId(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            Self::NotFound => (StatusCode::NOT_FOUND, "not found").into_response(),
            Self::Backend(err) => {
                tracing::error!(error = %err, "backend error");
                (StatusCode::BAD_GATEWAY, "backend unavailable").into_response()
            }
            Self::Internal(reason) => {
                tracing::error!(reason, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_invalid_id_to_bad_request() {
        let response = PageError::from(InvalidIdError::Empty).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn should_map_backend_error_to_bad_gateway() {
        let err = KarmandiaError::Rejected {
            status: 500,
            message: None,
        };
        let response = PageError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn should_unwrap_domain_invalid_id() {
        let err = KarmandiaError::InvalidId(InvalidIdError::InvalidCharacter('/'));
        assert!(matches!(PageError::from(err), PageError::InvalidId(_)));
    }

    #[test]
    fn should_map_not_found() {
        assert_eq!(
            PageError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }
}
