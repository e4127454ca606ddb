//! In-memory backend and session provider for the handler tests.

use std::any::Any;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::response::Response;
use http_body_util::BodyExt;

use karmandia_app::ports::{BackendApi, SessionProvider};
use karmandia_app::preview_store::PreviewStore;
use karmandia_app::query_cache::QueryCache;
use karmandia_app::services::create_flow::CreateExperienceFlow;
use karmandia_app::services::resource_service::ResourceService;
use karmandia_app::services::session_service::SessionService;
use karmandia_domain::contact::Contact;
use karmandia_domain::error::KarmandiaError;
use karmandia_domain::experience::{CreateReceipt, Experience, NewExperience};
use karmandia_domain::id::RecordId;
use karmandia_domain::navigation::DASHBOARD_ROOT;
use karmandia_domain::resource::{Envelope, Resource, ResourceKind};
use karmandia_domain::session::Credentials;

use crate::dashboard::auth::LOGIN_ROUTE;
use crate::session::SessionCookie;
use crate::state::AppState;

pub type TestState = AppState<Arc<StubBackend>, Arc<StubSessionProvider>>;

fn rejected() -> KarmandiaError {
    KarmandiaError::Rejected {
        status: 500,
        message: None,
    }
}

#[derive(Default)]
pub struct StubBackend {
    experiences: Mutex<Vec<Experience>>,
    contacts: Mutex<Vec<Contact>>,
    fail_lists: Mutex<bool>,
    fail_deletes: Mutex<bool>,
    fail_creates: Mutex<bool>,
    lists: Mutex<Vec<(ResourceKind, Option<String>)>>,
    deletes: Mutex<Vec<(ResourceKind, String)>>,
    creates: Mutex<Vec<(String, String, bool)>>,
}

impl StubBackend {
    pub fn add_experience(&self, experience: Experience) {
        self.experiences.lock().unwrap().push(experience);
    }

    pub fn add_contact(&self, contact: Contact) {
        self.contacts.lock().unwrap().push(contact);
    }

    pub fn fail_lists(&self) {
        *self.fail_lists.lock().unwrap() = true;
    }

    pub fn fail_deletes(&self) {
        *self.fail_deletes.lock().unwrap() = true;
    }

    pub fn fail_creates(&self) {
        *self.fail_creates.lock().unwrap() = true;
    }

    pub fn experience_count(&self) -> usize {
        self.experiences.lock().unwrap().len()
    }

    pub fn list_calls(&self, kind: ResourceKind) -> usize {
        self.lists
            .lock()
            .unwrap()
            .iter()
            .filter(|(listed, _)| *listed == kind)
            .count()
    }

    pub fn last_list_token(&self) -> Option<String> {
        self.lists
            .lock()
            .unwrap()
            .last()
            .and_then(|(_, token)| token.clone())
    }

    pub fn deletes(&self) -> Vec<(ResourceKind, String)> {
        self.deletes.lock().unwrap().clone()
    }

    /// `(title, description, has_image)` of every create call.
    pub fn creates(&self) -> Vec<(String, String, bool)> {
        self.creates.lock().unwrap().clone()
    }
}

impl BackendApi for StubBackend {
    fn list_requires_auth(&self, kind: ResourceKind) -> bool {
        kind == ResourceKind::Contact
    }

    async fn list<R: Resource>(
        &self,
        credentials: &Credentials,
    ) -> Result<Envelope<R>, KarmandiaError> {
        let token = credentials.token().map(|token| token.expose().to_string());
        self.lists.lock().unwrap().push((R::KIND, token));
        if *self.fail_lists.lock().unwrap() {
            return Err(rejected());
        }
        let records: Box<dyn Any + Send> = match R::KIND {
            ResourceKind::Experience => Box::new(self.experiences.lock().unwrap().clone()),
            ResourceKind::Contact => Box::new(self.contacts.lock().unwrap().clone()),
        };
        let data = records
            .downcast::<Vec<R>>()
            .map_err(|_| KarmandiaError::Decode("unexpected record type".into()))?;
        Ok(Envelope {
            success: true,
            message: String::new(),
            data: *data,
        })
    }

    async fn delete(
        &self,
        kind: ResourceKind,
        id: &RecordId,
        _credentials: &Credentials,
    ) -> Result<(), KarmandiaError> {
        self.deletes
            .lock()
            .unwrap()
            .push((kind, id.as_str().to_string()));
        if *self.fail_deletes.lock().unwrap() {
            return Err(rejected());
        }
        match kind {
            ResourceKind::Experience => self.experiences.lock().unwrap().retain(|e| &e.id != id),
            ResourceKind::Contact => self.contacts.lock().unwrap().retain(|c| &c.id != id),
        }
        Ok(())
    }

    async fn create_experience(
        &self,
        experience: &NewExperience,
        _credentials: &Credentials,
    ) -> Result<CreateReceipt, KarmandiaError> {
        self.creates.lock().unwrap().push((
            experience.title().to_string(),
            experience.description().to_string(),
            experience.image().is_some(),
        ));
        if *self.fail_creates.lock().unwrap() {
            return Err(rejected());
        }
        Ok(CreateReceipt::default())
    }
}

#[derive(Default)]
pub struct StubSessionProvider {
    fail: Mutex<bool>,
    sign_outs: Mutex<Vec<Option<String>>>,
}

impl StubSessionProvider {
    pub fn fail(&self) {
        *self.fail.lock().unwrap() = true;
    }

    /// Token presented with every sign-out call.
    pub fn sign_out_tokens(&self) -> Vec<Option<String>> {
        self.sign_outs.lock().unwrap().clone()
    }
}

impl SessionProvider for StubSessionProvider {
    async fn sign_out(&self, credentials: &Credentials) -> Result<(), KarmandiaError> {
        self.sign_outs
            .lock()
            .unwrap()
            .push(credentials.token().map(|token| token.expose().to_string()));
        if *self.fail.lock().unwrap() {
            return Err(KarmandiaError::Transport("provider unreachable".into()));
        }
        Ok(())
    }
}

/// State wired to `backend` and a fresh session provider.
pub fn test_state(backend: StubBackend) -> (TestState, Arc<StubBackend>, Arc<StubSessionProvider>) {
    test_state_with_login(backend, LOGIN_ROUTE)
}

/// Like [`test_state`], with the login page at `login_route`.
pub fn test_state_with_login(
    backend: StubBackend,
    login_route: &str,
) -> (TestState, Arc<StubBackend>, Arc<StubSessionProvider>) {
    let backend = Arc::new(backend);
    let provider = Arc::new(StubSessionProvider::default());
    let state = AppState::new(
        ResourceService::new(Arc::clone(&backend), Arc::new(QueryCache::new())),
        SessionService::new(Arc::clone(&provider), login_route),
        CreateExperienceFlow::new(DASHBOARD_ROOT),
        PreviewStore::new(8),
        SessionCookie::default(),
    );
    (state, backend, provider)
}

/// The full router over `backend`.
pub fn test_app(backend: StubBackend) -> (Router, Arc<StubBackend>) {
    let (state, backend, _) = test_state(backend);
    (crate::router::build(state), backend)
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn experience(id: &str, title: &str, description: &str) -> Experience {
    Experience {
        id: id.parse().unwrap(),
        title: title.to_string(),
        description: description.to_string(),
        image: None,
        version: 0,
    }
}

pub fn contact(id: &str, name: &str, description: &str) -> Contact {
    Contact {
        id: id.parse().unwrap(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        home_base: "Lisbon".to_string(),
        instagram: format!("@{}", name.to_lowercase()),
        description: description.to_string(),
    }
}
