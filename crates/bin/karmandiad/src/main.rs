//! # karmandiad — karmandia admin dashboard daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`karmandia.toml` plus environment overrides)
//! - Initialise `tracing` logging
//! - Construct the reqwest backend client and the sign-out provider
//! - Construct application services around the shared query cache
//! - Build the axum router and serve it until SIGINT/SIGTERM
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use karmandia_adapter_backend_reqwest::HttpBackend;
use karmandia_adapter_http_axum::session::SessionCookie;
use karmandia_adapter_http_axum::state::AppState;
use karmandia_app::preview_store::PreviewStore;
use karmandia_app::query_cache::QueryCache;
use karmandia_app::services::create_flow::CreateExperienceFlow;
use karmandia_app::services::resource_service::ResourceService;
use karmandia_app::services::session_service::SessionService;
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.logging.filter)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting karmandiad");

    // Adapters
    let backend = HttpBackend::new(&config.backend).context("invalid backend configuration")?;
    let provider = backend
        .session_provider(config.session.sign_out_url.as_deref())
        .context("invalid sign-out url")?;
    tracing::info!(backend = %backend.base_url(), "backend configured");

    // Services
    let cache = Arc::new(QueryCache::with_stale_after(config.cache.stale_after()));
    let state = AppState::new(
        ResourceService::new(backend, cache),
        SessionService::new(provider, config.session.login_route.clone()),
        CreateExperienceFlow::new(config.dashboard.after_create_route.clone()),
        PreviewStore::new(config.dashboard.preview_capacity),
        SessionCookie::new(config.session.cookie_name.clone()),
    );
    let app = karmandia_adapter_http_axum::router::build(state);

    // HTTP
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!("karmandiad listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutdown complete");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received ctrl-c, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
