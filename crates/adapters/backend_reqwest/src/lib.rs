//! # karmandia-adapter-backend-reqwest
//!
//! Driven adapter for the karmandia REST API.
//!
//! ## Responsibilities
//! - Fetch the experience and contact collections (`GET /experience`,
//!   `GET /contact`)
//! - Delete single records (`DELETE /<collection>/delete/{id}`)
//! - Upload new experiences as `multipart/form-data`
//!   (`POST /experience/create`)
//! - Optionally notify the identity provider on sign-out
//!
//! Which list calls carry the bearer token is decided by [`AuthPolicy`];
//! mutations always attach it when the session has one.
//!
//! ## Dependency rule
//! Depends on `karmandia-app` (port traits) and `karmandia-domain`.

mod client;
mod config;
mod error;
mod session;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use client::HttpBackend;
pub use config::{AuthPolicy, BackendConfig};
pub use error::BackendError;
pub use session::RemoteSessionProvider;
