//! Logout from the navigation shell.

use karmandia_domain::dialog::LogoutDialog;
use karmandia_domain::session::Credentials;

use crate::ports::SessionProvider;

pub struct SessionService<S> {
    provider: S,
    login_route: String,
}

impl<S: SessionProvider> SessionService<S> {
    pub fn new(provider: S, login_route: impl Into<String>) -> Self {
        Self {
            provider,
            login_route: login_route.into(),
        }
    }

    #[must_use]
    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    /// Confirm the logout dialog and sign out.
    ///
    /// Returns where to send the browser, or `None` if the dialog was not
    /// open. The local session ends even when the provider call fails.
    pub async fn logout(&self, dialog: &mut LogoutDialog, credentials: &Credentials) -> Option<&str> {
        if !dialog.confirm() {
            return None;
        }
        if let Err(err) = self.provider.sign_out(credentials).await {
            tracing::warn!(error = %err, "remote sign-out failed");
        }
        Some(&self.login_route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::FakeSessionProvider;

    #[tokio::test]
    async fn should_sign_out_and_redirect_when_open() {
        let service = SessionService::new(FakeSessionProvider::default(), "/login");
        let mut dialog = LogoutDialog::Open;

        let target = service.logout(&mut dialog, &Credentials::anonymous()).await;

        assert_eq!(target, Some("/login"));
        assert_eq!(dialog, LogoutDialog::Closed);
        assert_eq!(*service.provider.sign_outs.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn should_ignore_closed_dialog() {
        let service = SessionService::new(FakeSessionProvider::default(), "/login");
        let mut dialog = LogoutDialog::Closed;

        assert!(service.logout(&mut dialog, &Credentials::anonymous()).await.is_none());
        assert_eq!(*service.provider.sign_outs.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn should_redirect_even_if_provider_fails() {
        let provider = FakeSessionProvider {
            fail: true,
            ..FakeSessionProvider::default()
        };
        let service = SessionService::new(provider, "/login");
        let mut dialog = LogoutDialog::Open;

        let target = service.logout(&mut dialog, &Credentials::anonymous()).await;

        assert_eq!(target, Some("/login"));
    }

    #[test]
    fn should_close_without_side_effects_on_cancel() {
        let mut dialog = LogoutDialog::Open;
        dialog.cancel();
        assert!(!dialog.is_open());
    }
}
