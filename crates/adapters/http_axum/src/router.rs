//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use karmandia_app::ports::{BackendApi, SessionProvider};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Serves the dashboard pages plus `/health`. A [`TraceLayer`] logs each
/// request/response through `tracing`.
pub fn build<B, S>(state: AppState<B, S>) -> Router
where
    B: BackendApi + Send + Sync + 'static,
    S: SessionProvider + Send + Sync + 'static,
{
    let login_route = state.sessions.login_route().to_string();
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::dashboard::routes::<B, S>(&login_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
