//! Reqwest implementation of the backend port.

use std::time::Duration;

use karmandia_app::ports::BackendApi;
use karmandia_domain::error::KarmandiaError;
use karmandia_domain::experience::{CreateReceipt, NewExperience};
use karmandia_domain::id::RecordId;
use karmandia_domain::resource::{Envelope, Resource, ResourceKind};
use karmandia_domain::session::Credentials;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{AuthPolicy, BackendConfig};
use crate::error::BackendError;
use crate::session::RemoteSessionProvider;

/// Path of the experience upload endpoint.
const CREATE_EXPERIENCE_PATH: &str = "/experience/create";

/// Client for the REST API holding experiences and contacts.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    auth: AuthPolicy,
}

impl HttpBackend {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is not an absolute `http(s)` URL
    /// or the reqwest client cannot be constructed.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let base_url = parse_base_url(&config.base_url)?;
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
            auth: config.auth,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// A sign-out client sharing this backend's connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error when `sign_out_url` is set but invalid.
    pub fn session_provider(
        &self,
        sign_out_url: Option<&str>,
    ) -> Result<RemoteSessionProvider, BackendError> {
        let sign_out_url = sign_out_url.map(parse_base_url).transpose()?;
        Ok(RemoteSessionProvider::new(self.client.clone(), sign_out_url))
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }
}

/// Parse an absolute `http(s)` URL.
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, BackendError> {
    let url = Url::parse(raw.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(BackendError::UnsupportedScheme(other.to_string())),
    }
}

/// Attach the bearer token when `attach` is set and the session has one.
pub(crate) fn authorize(
    request: RequestBuilder,
    credentials: &Credentials,
    attach: bool,
) -> RequestBuilder {
    match credentials.token() {
        Some(token) if attach => request.bearer_auth(token.expose()),
        _ => request,
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Turn a non-success response into [`BackendError::Status`].
pub(crate) async fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.bytes().await.unwrap_or_default();
    Err(status_error(status, &body))
}

fn status_error(status: StatusCode, body: &[u8]) -> BackendError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message);
    BackendError::Status {
        status: status.as_u16(),
        message,
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let response = ensure_success(response).await?;
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

fn experience_form(experience: &NewExperience) -> Result<Form, BackendError> {
    let form = Form::new()
        .text("title", experience.title().to_owned())
        .text("desccription", experience.description().to_owned());
    let Some(image) = experience.image() else {
        return Ok(form);
    };
    let part = Part::bytes(image.bytes.clone())
        .file_name(image.file_name.clone())
        .mime_str(&image.content_type)?;
    Ok(form.part("image", part))
}

impl HttpBackend {
    async fn fetch_list<R: Resource>(
        &self,
        credentials: &Credentials,
    ) -> Result<Envelope<R>, BackendError> {
        let kind = R::KIND;
        let url = self.endpoint(kind.collection_path())?;
        let request = authorize(self.client.get(url), credentials, self.auth.for_list(kind));
        let response = request.send().await?;
        read_json(response).await
    }

    async fn send_delete(
        &self,
        kind: ResourceKind,
        id: &RecordId,
        credentials: &Credentials,
    ) -> Result<(), BackendError> {
        let url = self.endpoint(&kind.delete_path(id))?;
        let response = authorize(self.client.delete(url), credentials, true)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn send_create(
        &self,
        experience: &NewExperience,
        credentials: &Credentials,
    ) -> Result<CreateReceipt, BackendError> {
        let url = self.endpoint(CREATE_EXPERIENCE_PATH)?;
        let form = experience_form(experience)?;
        let response = authorize(self.client.post(url), credentials, true)
            .multipart(form)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(CreateReceipt::default());
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

impl BackendApi for HttpBackend {
    fn list_requires_auth(&self, kind: ResourceKind) -> bool {
        self.auth.for_list(kind)
    }

    async fn list<R: Resource>(
        &self,
        credentials: &Credentials,
    ) -> Result<Envelope<R>, KarmandiaError> {
        let envelope = self.fetch_list::<R>(credentials).await?;
        tracing::debug!(
            resource = R::KIND.plural(),
            count = envelope.data.len(),
            "listed records"
        );
        Ok(envelope)
    }

    async fn delete(
        &self,
        kind: ResourceKind,
        id: &RecordId,
        credentials: &Credentials,
    ) -> Result<(), KarmandiaError> {
        self.send_delete(kind, id, credentials).await?;
        tracing::debug!(resource = kind.singular(), %id, "deleted record");
        Ok(())
    }

    async fn create_experience(
        &self,
        experience: &NewExperience,
        credentials: &Credentials,
    ) -> Result<CreateReceipt, KarmandiaError> {
        let receipt = self.send_create(experience, credentials).await?;
        tracing::debug!(title = experience.title(), "uploaded experience");
        Ok(receipt)
    }
}
