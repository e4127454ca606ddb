//! Session port — the identity provider that issued the bearer token.

use std::future::Future;
use std::sync::Arc;

use karmandia_domain::error::KarmandiaError;
use karmandia_domain::session::Credentials;

/// Ends sessions on behalf of the navigation shell.
pub trait SessionProvider {
    /// Sign the holder of `credentials` out.
    fn sign_out(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<(), KarmandiaError>> + Send;
}

impl<T: SessionProvider + Send + Sync> SessionProvider for Arc<T> {
    fn sign_out(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<(), KarmandiaError>> + Send {
        (**self).sign_out(credentials)
    }
}
