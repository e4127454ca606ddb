//! Session entry and exit: the token form and the logout confirmation.

use askama::Template;
use axum::Form;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use karmandia_app::ports::{BackendApi, SessionProvider};
use karmandia_domain::dialog::LogoutDialog;
use karmandia_domain::navigation::DASHBOARD_ROOT;
use karmandia_domain::session::BearerToken;

use super::render;
use crate::error::PageError;
use crate::session::is_cookie_safe;
use crate::state::AppState;

/// Default route of the login page, where the logout sends the browser.
pub const LOGIN_ROUTE: &str = "/login";

/// Routes the dashboard already serves.
const RESERVED_ROUTES: &[&str] = &["/", "/health", "/logout"];

/// Whether `route` names a page this server can mount the login form at.
///
/// Anything else, such as an external sign-in URL, is only used as a
/// redirect target.
#[must_use]
pub fn is_local_route(route: &str) -> bool {
    route.starts_with('/')
        && !route.starts_with("//")
        && !RESERVED_ROUTES.contains(&route)
        && route != DASHBOARD_ROOT
        && !route.starts_with("/dashboard/")
        && route
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'/' | b'-' | b'_' | b'.'))
}

const INVALID_TOKEN: &str = "Enter a valid access token";

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    action: String,
    error: Option<&'static str>,
}

impl IntoResponse for LoginTemplate {
    fn into_response(self) -> Response {
        render(&self)
    }
}

/// `GET /` — straight to the dashboard.
pub async fn root() -> Redirect {
    Redirect::to(DASHBOARD_ROOT)
}

/// `GET <login route>` — the token form.
pub async fn login_page<B, S>(State(state): State<AppState<B, S>>) -> LoginTemplate
where
    B: BackendApi + Send + Sync + 'static,
    S: SessionProvider + Send + Sync + 'static,
{
    LoginTemplate {
        action: state.sessions.login_route().to_string(),
        error: None,
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    token: String,
}

/// `POST <login route>` — store the pasted token in the session cookie.
pub async fn login<B, S>(
    State(state): State<AppState<B, S>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, PageError>
where
    B: BackendApi + Send + Sync + 'static,
    S: SessionProvider + Send + Sync + 'static,
{
    let token = form.token.trim();
    let Some(token) = BearerToken::new(token).filter(|_| is_cookie_safe(token)) else {
        let page = LoginTemplate {
            action: state.sessions.login_route().to_string(),
            error: Some(INVALID_TOKEN),
        };
        return Ok((StatusCode::BAD_REQUEST, page).into_response());
    };
    let cookie = state
        .cookie
        .issue(&token)
        .map_err(|_| PageError::Internal("session cookie not representable"))?;
    tracing::info!("session started");
    Ok(([(header::SET_COOKIE, cookie)], Redirect::to(DASHBOARD_ROOT)).into_response())
}

/// `POST /logout` — the logout dialog's confirm button.
///
/// The cookie is cleared even when the identity provider cannot be reached.
pub async fn logout<B, S>(
    State(state): State<AppState<B, S>>,
    headers: HeaderMap,
) -> Result<Response, PageError>
where
    B: BackendApi + Send + Sync + 'static,
    S: SessionProvider + Send + Sync + 'static,
{
    let credentials = state.cookie.credentials(&headers);
    let mut dialog = LogoutDialog::Open;
    let target = state
        .sessions
        .logout(&mut dialog, &credentials)
        .await
        .unwrap_or(LOGIN_ROUTE)
        .to_string();
    let cookie = state
        .cookie
        .expire()
        .map_err(|_| PageError::Internal("session cookie not representable"))?;
    tracing::info!("session ended");
    Ok(([(header::SET_COOKIE, cookie)], Redirect::to(&target)).into_response())
}
