//! Server-side rendered HTML dashboard (no JavaScript).

pub mod add_experience;
pub mod auth;
pub mod experiences;
pub mod layout;
pub mod planning;
pub mod records;

use askama::Template;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use url::form_urlencoded;

use karmandia_app::ports::{BackendApi, SessionProvider};
use karmandia_domain::contact::Contact;
use karmandia_domain::experience::Experience;
use karmandia_domain::navigation::{ADD_EXPERIENCE_ROUTE, DASHBOARD_ROOT, PLANNING_ROUTE};

use crate::state::AppState;

/// Largest accepted create-form body.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Build the dashboard sub-router for SSR HTML pages.
///
/// The login form is mounted at `login_route` when it is a local route.
pub fn routes<B, S>(login_route: &str) -> Router<AppState<B, S>>
where
    B: BackendApi + Send + Sync + 'static,
    S: SessionProvider + Send + Sync + 'static,
{
    let mut router = Router::new();
    if auth::is_local_route(login_route) {
        router = router.route(
            login_route,
            get(auth::login_page::<B, S>).post(auth::login::<B, S>),
        );
    } else {
        tracing::info!(login_route, "login page is external, not mounted");
    }
    router
        .route("/", get(auth::root))
        .route("/logout", post(auth::logout::<B, S>))
        .route(DASHBOARD_ROOT, get(experiences::list::<B, S>))
        .route(
            "/dashboard/experiences/{id}/delete",
            post(records::delete::<B, S, Experience>),
        )
        .route(
            ADD_EXPERIENCE_ROUTE,
            get(add_experience::form)
                .post(add_experience::submit::<B, S>)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/dashboard/previews/{id}",
            get(add_experience::preview::<B, S>),
        )
        .route(PLANNING_ROUTE, get(planning::list::<B, S>))
        .route(
            "/dashboard/contacts/{id}/delete",
            post(records::delete::<B, S, Contact>),
        )
}

/// Render `template` into an HTML response.
pub(crate) fn render<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "template rendering failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `path` with `params` appended to its query string.
pub(crate) fn location(path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}{query}")
}
