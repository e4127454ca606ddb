//! In-process mock of the REST API for tests.
//!
//! Serves the same routes as the real backend on a random local port, keeps
//! records in memory and remembers every request it received.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Path of the mock's sign-out endpoint.
pub const SIGN_OUT_PATH: &str = "/auth/sign-out";

/// Routes a test can inspect or make fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockRoute {
    ListExperiences,
    ListContacts,
    DeleteExperience,
    DeleteContact,
    CreateExperience,
    SignOut,
}

/// One part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedField {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub value: Vec<u8>,
}

impl RecordedField {
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.value).into_owned()
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub route: MockRoute,
    pub path: String,
    /// Token from the `Authorization: Bearer` header.
    pub bearer: Option<String>,
    pub fields: Vec<RecordedField>,
}

impl RecordedRequest {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&RecordedField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

#[derive(Default)]
struct MockState {
    experiences: Vec<Value>,
    contacts: Vec<Value>,
    failures: HashMap<MockRoute, u16>,
    create_message: Option<String>,
    requests: Vec<RecordedRequest>,
    created: u32,
}

impl MockState {
    fn record(&mut self, route: MockRoute, uri: &Uri, headers: &HeaderMap, fields: Vec<RecordedField>) {
        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_string);
        self.requests.push(RecordedRequest {
            route,
            path: uri.path().to_string(),
            bearer,
            fields,
        });
    }

    fn failure(&self, route: MockRoute) -> Option<Response> {
        let status = *self.failures.get(&route)?;
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Some(
            (
                status,
                Json(json!({"success": false, "message": "mock failure"})),
            )
                .into_response(),
        )
    }
}

type Shared = Arc<Mutex<MockState>>;

/// Mock REST backend bound to `127.0.0.1` on a random port.
///
/// The server task is aborted when the value is dropped.
pub struct MockBackend {
    addr: SocketAddr,
    state: Shared,
    handle: JoinHandle<()>,
}

impl MockBackend {
    /// Bind and start serving.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the listener cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let state: Shared = Arc::default();

        let app = Router::new()
            .route("/experience", get(list_experiences))
            .route("/experience/create", post(create_experience))
            .route("/experience/delete/{id}", delete(delete_experience))
            .route("/contact", get(list_contacts))
            .route("/contact/delete/{id}", delete(delete_contact))
            .route(SIGN_OUT_PATH, post(sign_out))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                tracing::error!(error = %err, "mock backend stopped");
            }
        });

        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL to configure the client with.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn add_experience(&self, id: &str, title: &str, description: &str) {
        self.state.lock().await.experiences.push(json!({
            "_id": id,
            "title": title,
            "desccription": description,
            "image": {"url": format!("https://cdn.example/{id}.jpg"), "public_id": id},
            "__v": 0
        }));
    }

    pub async fn add_contact(&self, id: &str, name: &str, description: &str) {
        self.state.lock().await.contacts.push(json!({
            "_id": id,
            "name": name,
            "email": format!("{}@example.com", name.to_lowercase()),
            "homeBase": "Lisbon",
            "instagram": format!("@{}", name.to_lowercase()),
            "description": description
        }));
    }

    /// Answer `route` with `status` until [`MockBackend::recover`] is called.
    pub async fn fail(&self, route: MockRoute, status: u16) {
        self.state.lock().await.failures.insert(route, status);
    }

    pub async fn recover(&self, route: MockRoute) {
        self.state.lock().await.failures.remove(&route);
    }

    /// `message` returned by successful creates; `None` omits it.
    pub async fn set_create_message(&self, message: Option<&str>) {
        self.state.lock().await.create_message = message.map(str::to_string);
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }

    pub async fn requests_for(&self, route: MockRoute) -> Vec<RecordedRequest> {
        self.requests()
            .await
            .into_iter()
            .filter(|request| request.route == route)
            .collect()
    }

    pub async fn experiences(&self) -> Vec<Value> {
        self.state.lock().await.experiences.clone()
    }

    pub async fn contacts(&self) -> Vec<Value> {
        self.state.lock().await.contacts.clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn list_experiences(State(state): State<Shared>, uri: Uri, headers: HeaderMap) -> Response {
    list_collection(&state, MockRoute::ListExperiences, &uri, &headers).await
}

async fn list_contacts(State(state): State<Shared>, uri: Uri, headers: HeaderMap) -> Response {
    list_collection(&state, MockRoute::ListContacts, &uri, &headers).await
}

async fn list_collection(state: &Shared, route: MockRoute, uri: &Uri, headers: &HeaderMap) -> Response {
    let mut state = state.lock().await;
    state.record(route, uri, headers, Vec::new());
    if let Some(response) = state.failure(route) {
        return response;
    }
    let data = if route == MockRoute::ListContacts {
        state.contacts.clone()
    } else {
        state.experiences.clone()
    };
    Json(json!({"success": true, "message": "fetched", "data": data})).into_response()
}

async fn delete_experience(
    State(state): State<Shared>,
    Path(id): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    delete_record(&state, MockRoute::DeleteExperience, &id, &uri, &headers).await
}

async fn delete_contact(
    State(state): State<Shared>,
    Path(id): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    delete_record(&state, MockRoute::DeleteContact, &id, &uri, &headers).await
}

async fn delete_record(
    state: &Shared,
    route: MockRoute,
    id: &str,
    uri: &Uri,
    headers: &HeaderMap,
) -> Response {
    let mut state = state.lock().await;
    state.record(route, uri, headers, Vec::new());
    if let Some(response) = state.failure(route) {
        return response;
    }
    let records = if route == MockRoute::DeleteContact {
        &mut state.contacts
    } else {
        &mut state.experiences
    };
    records.retain(|record| record["_id"] != id);
    Json(json!({"success": true, "message": "deleted"})).into_response()
}

async fn create_experience(
    State(state): State<Shared>,
    uri: Uri,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let mut fields = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let value = field.bytes().await.unwrap_or_default().to_vec();
        fields.push(RecordedField {
            name,
            file_name,
            content_type,
            value,
        });
    }

    let mut state = state.lock().await;
    state.record(MockRoute::CreateExperience, &uri, &headers, fields.clone());
    if let Some(response) = state.failure(MockRoute::CreateExperience) {
        return response;
    }

    let text = |name: &str| {
        fields
            .iter()
            .find(|field| field.name == name)
            .map(RecordedField::text)
            .unwrap_or_default()
    };
    state.created += 1;
    let id = format!("created{}", state.created);
    let image = fields
        .iter()
        .find(|field| field.name == "image")
        .map(|_| json!({"url": format!("https://cdn.example/{id}.jpg"), "public_id": id}));
    let record = json!({
        "_id": id,
        "title": text("title"),
        "desccription": text("desccription"),
        "image": image,
        "__v": 0
    });
    state.experiences.push(record);

    let message = state.create_message.clone();
    Json(json!({"message": message})).into_response()
}

async fn sign_out(State(state): State<Shared>, uri: Uri, headers: HeaderMap) -> Response {
    let mut state = state.lock().await;
    state.record(MockRoute::SignOut, &uri, &headers, Vec::new());
    if let Some(response) = state.failure(MockRoute::SignOut) {
        return response;
    }
    StatusCode::NO_CONTENT.into_response()
}
