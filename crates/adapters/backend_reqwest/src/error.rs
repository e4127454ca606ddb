//! Backend adapter error types.

use karmandia_domain::error::KarmandiaError;

/// Errors specific to the REST backend adapter.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The configured base URL could not be parsed.
    #[error("invalid backend url")]
    Url(#[from] url::ParseError),

    /// The base URL parsed but is not an absolute `http(s)` URL.
    #[error("backend url must use http or https, got {0:?}")]
    UnsupportedScheme(String),

    /// Building, sending or reading a request failed.
    #[error("backend request failed")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend answered with status {status}")]
    Status {
        status: u16,
        /// `message` from the error body, when the backend sent one.
        message: Option<String>,
    },

    /// A success response did not match the expected JSON shape.
    #[error("malformed backend response")]
    Decode(#[from] serde_json::Error),
}

impl From<BackendError> for KarmandiaError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Status { status, message } => Self::Rejected { status, message },
            BackendError::Decode(inner) => Self::Decode(Box::new(inner)),
            other => Self::Transport(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_status_error() {
        let err = BackendError::Status {
            status: 401,
            message: Some("unauthorized".to_string()),
        };
        assert_eq!(err.to_string(), "backend answered with status 401");
    }

    #[test]
    fn should_convert_status_to_rejected() {
        let err: KarmandiaError = BackendError::Status {
            status: 404,
            message: None,
        }
        .into();
        assert!(matches!(
            err,
            KarmandiaError::Rejected {
                status: 404,
                message: None
            }
        ));
    }

    #[test]
    fn should_convert_decode_error() {
        let inner = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: KarmandiaError = BackendError::Decode(inner).into();
        assert!(matches!(err, KarmandiaError::Decode(_)));
    }

    #[test]
    fn should_convert_url_error_to_transport() {
        let err: KarmandiaError = BackendError::UnsupportedScheme("ftp".to_string()).into();
        assert!(matches!(err, KarmandiaError::Transport(_)));
    }
}
