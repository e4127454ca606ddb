//! Shared application state for axum handlers.

use std::sync::Arc;

use karmandia_app::ports::{BackendApi, SessionProvider};
use karmandia_app::preview_store::PreviewStore;
use karmandia_app::services::create_flow::CreateExperienceFlow;
use karmandia_app::services::resource_service::ResourceService;
use karmandia_app::services::session_service::SessionService;

use crate::session::SessionCookie;

/// Application state shared across all axum handlers.
///
/// Generic over the backend and the session provider to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<B, S> {
    /// Cached collection reads and mutations.
    pub resources: Arc<ResourceService<B>>,
    /// Logout handling.
    pub sessions: Arc<SessionService<S>>,
    pub create_flow: Arc<CreateExperienceFlow>,
    /// Images uploaded through the create form, kept for re-renders.
    pub previews: Arc<PreviewStore>,
    pub cookie: Arc<SessionCookie>,
}

impl<B, S> Clone for AppState<B, S> {
    fn clone(&self) -> Self {
        Self {
            resources: Arc::clone(&self.resources),
            sessions: Arc::clone(&self.sessions),
            create_flow: Arc::clone(&self.create_flow),
            previews: Arc::clone(&self.previews),
            cookie: Arc::clone(&self.cookie),
        }
    }
}

impl<B, S> AppState<B, S>
where
    B: BackendApi + Send + Sync + 'static,
    S: SessionProvider + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        resources: ResourceService<B>,
        sessions: SessionService<S>,
        create_flow: CreateExperienceFlow,
        previews: PreviewStore,
        cookie: SessionCookie,
    ) -> Self {
        Self {
            resources: Arc::new(resources),
            sessions: Arc::new(sessions),
            create_flow: Arc::new(create_flow),
            previews: Arc::new(previews),
            cookie: Arc::new(cookie),
        }
    }
}
