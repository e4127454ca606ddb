//! Create-experience form.
//!
//! The form posts `multipart/form-data`. A picked image is parked in the
//! preview store so that a re-rendered form (validation or upload failure)
//! can show it and resubmit it without asking for the file again.

use askama::Template;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};

use karmandia_app::ports::{BackendApi, SessionProvider};
use karmandia_app::preview_store::PreviewStore;
use karmandia_app::services::create_flow::CreateOutcome;
use karmandia_domain::experience::{ExperienceDraft, ImageUpload};
use karmandia_domain::id::PreviewId;
use karmandia_domain::navigation::ADD_EXPERIENCE_ROUTE;
use karmandia_domain::notice::Notice;
use karmandia_domain::validation::{Field, FormErrors};

use super::layout::{PageQuery, Shell};
use super::render;
use crate::error::PageError;
use crate::flash::{self, Flash};
use crate::state::AppState;

/// Create form template.
#[derive(Template)]
#[template(path = "add_experience.html")]
pub struct AddExperienceTemplate {
    shell: Shell,
    action: &'static str,
    title: String,
    description: String,
    preview_id: Option<String>,
    title_error: Option<&'static str>,
    description_error: Option<&'static str>,
    image_error: Option<&'static str>,
}

impl AddExperienceTemplate {
    fn new(shell: Shell) -> Self {
        Self {
            shell,
            action: ADD_EXPERIENCE_ROUTE,
            title: String::new(),
            description: String::new(),
            preview_id: None,
            title_error: None,
            description_error: None,
            image_error: None,
        }
    }

    fn populated(
        shell: Shell,
        draft: ExperienceDraft,
        preview: Option<PreviewId>,
        errors: Option<&FormErrors>,
    ) -> Self {
        let error = |field| errors.and_then(|errors| errors.for_field(field));
        Self {
            title_error: error(Field::Title),
            description_error: error(Field::Description),
            image_error: error(Field::Image),
            title: draft.title,
            description: draft.description,
            preview_id: preview.map(|id| id.to_string()),
            ..Self::new(shell)
        }
    }

    fn preview_src(&self) -> Option<String> {
        self.preview_id
            .as_ref()
            .map(|id| format!("/dashboard/previews/{id}"))
    }
}

impl IntoResponse for AddExperienceTemplate {
    fn into_response(self) -> Response {
        render(&self)
    }
}

/// `GET /dashboard/add-experience` — empty create form.
pub async fn form(Query(query): Query<PageQuery>, headers: HeaderMap) -> Response {
    let flash = Flash::from_headers(&headers);
    let shell = Shell::new("Add Experiences", ADD_EXPERIENCE_ROUTE, &query, flash.notice());
    flash.respond(AddExperienceTemplate::new(shell))
}

/// Fields read from the multipart body.
#[derive(Default)]
struct Submission {
    title: String,
    description: String,
    image: Option<ImageUpload>,
    preview_id: Option<PreviewId>,
}

async fn read_submission(multipart: &mut Multipart) -> Result<Submission, PageError> {
    let mut submission = Submission::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => submission.title = field.text().await?,
            "description" => submission.description = field.text().await?,
            "preview_id" => submission.preview_id = field.text().await?.trim().parse().ok(),
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await?;
                // an untouched file input still sends an empty part
                if !file_name.is_empty() || !bytes.is_empty() {
                    submission.image = Some(ImageUpload {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            other => tracing::debug!(field = other, "ignoring unknown form field"),
        }
    }
    Ok(submission)
}

/// Pick the image to submit: a new upload replaces the parked preview,
/// otherwise the parked preview is reused.
fn resolve_image(
    previews: &PreviewStore,
    submission: &mut Submission,
) -> (Option<ImageUpload>, Option<PreviewId>) {
    match submission.image.take() {
        Some(upload) if upload.is_image() => {
            let id = previews.replace(submission.preview_id, upload.clone());
            (Some(upload), Some(id))
        }
        Some(upload) => {
            if let Some(previous) = submission.preview_id {
                previews.release(previous);
            }
            (Some(upload), None)
        }
        None => match submission.preview_id {
            Some(id) => match previews.get(id) {
                Some(image) => (Some(ImageUpload::clone(&image)), Some(id)),
                None => (None, None),
            },
            None => (None, None),
        },
    }
}

/// `POST /dashboard/add-experience` — validate and upload (PRG on success).
pub async fn submit<B, S>(
    State(state): State<AppState<B, S>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Response, PageError>
where
    B: BackendApi + Send + Sync + 'static,
    S: SessionProvider + Send + Sync + 'static,
{
    let mut submission = read_submission(&mut multipart).await?;
    let (image, preview) = resolve_image(&state.previews, &mut submission);
    let draft = ExperienceDraft {
        title: submission.title,
        description: submission.description,
        image,
    };

    let credentials = state.cookie.credentials(&headers);
    let query = PageQuery::default();
    let shell = |notice: Option<Notice>| {
        Shell::new("Add Experiences", ADD_EXPERIENCE_ROUTE, &query, notice)
    };

    let outcome = state
        .create_flow
        .submit(&state.resources, draft, &credentials)
        .await;
    let response = match outcome {
        CreateOutcome::Invalid { draft, errors } => {
            let page = AddExperienceTemplate::populated(shell(None), draft, preview, Some(&errors));
            (StatusCode::UNPROCESSABLE_ENTITY, page).into_response()
        }
        CreateOutcome::Created {
            notice,
            redirect_to,
        } => {
            if let Some(id) = preview {
                state.previews.release(id);
            }
            flash::redirect(&redirect_to, Some(&notice))
        }
        CreateOutcome::Failed { draft, notice } => {
            let page = AddExperienceTemplate::populated(shell(Some(notice)), draft, preview, None);
            (StatusCode::BAD_GATEWAY, page).into_response()
        }
    };
    Ok(response)
}

/// `GET /dashboard/previews/{id}` — a parked image.
pub async fn preview<B, S>(
    State(state): State<AppState<B, S>>,
    Path(id): Path<String>,
) -> Result<Response, PageError>
where
    B: BackendApi + Send + Sync + 'static,
    S: SessionProvider + Send + Sync + 'static,
{
    let id: PreviewId = id.parse().map_err(|_| PageError::NotFound)?;
    let image = state.previews.get(id).ok_or(PageError::NotFound)?;
    Ok((
        [
            (header::CONTENT_TYPE, image.content_type.clone()),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff".to_string()),
            (
                header::CONTENT_SECURITY_POLICY,
                "default-src 'none'; sandbox".to_string(),
            ),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
        image.bytes.clone(),
    )
        .into_response())
}
