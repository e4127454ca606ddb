//! Remote sign-out against the identity provider.

use karmandia_app::ports::SessionProvider;
use karmandia_domain::error::KarmandiaError;
use karmandia_domain::session::Credentials;
use reqwest::Client;
use url::Url;

use crate::client::{authorize, ensure_success};
use crate::error::BackendError;

/// Signs sessions out by posting to a configured URL.
///
/// Without a URL, signing out is purely local and always succeeds.
#[derive(Debug, Clone)]
pub struct RemoteSessionProvider {
    client: Client,
    sign_out_url: Option<Url>,
}

impl RemoteSessionProvider {
    #[must_use]
    pub fn new(client: Client, sign_out_url: Option<Url>) -> Self {
        Self {
            client,
            sign_out_url,
        }
    }

    async fn post_sign_out(&self, url: Url, credentials: &Credentials) -> Result<(), BackendError> {
        let response = authorize(self.client.post(url), credentials, true)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

impl SessionProvider for RemoteSessionProvider {
    async fn sign_out(&self, credentials: &Credentials) -> Result<(), KarmandiaError> {
        let Some(url) = self.sign_out_url.clone() else {
            tracing::debug!("no sign-out url configured, ending session locally");
            return Ok(());
        };
        self.post_sign_out(url, credentials).await?;
        tracing::debug!("signed out remotely");
        Ok(())
    }
}
