//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`KarmandiaError`] via `#[from]` (or an explicit `From` impl in adapters).

use std::error::Error as StdError;

use crate::validation::FormErrors;

/// Boxed error for failures whose concrete type lives in an adapter.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Top-level error shared by the application and its ports.
#[derive(Debug, thiserror::Error)]
pub enum KarmandiaError {
    /// Client-side form validation rejected the input.
    #[error("validation error")]
    Validation(#[from] FormErrors),

    /// A record identifier could not be parsed.
    #[error("invalid record id")]
    InvalidId(#[from] InvalidIdError),

    /// The backend answered with a non-2xx status.
    #[error("backend rejected request with status {status}")]
    Rejected {
        /// HTTP status code returned by the backend.
        status: u16,
        /// `message` field of the error body, when the backend sent one.
        message: Option<String>,
    },

    /// The request never produced a response (connection, TLS, timeout…).
    #[error("{0}")]
    Transport(#[source] BoxError),

    /// The backend answered 2xx but the body was not what we expected.
    #[error("failed to decode backend response")]
    Decode(#[source] BoxError),
}

/// Reasons a string is not a valid [`RecordId`](crate::id::RecordId).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidIdError {
    #[error("record id must not be empty")]
    Empty,
    #[error("record id contains invalid character {0:?}")]
    InvalidCharacter(char),
}
