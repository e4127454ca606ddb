//! Dashboard page listing experiences.

use askama::Template;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};

use karmandia_app::ports::{BackendApi, SessionProvider};
use karmandia_app::services::list_view::ListView;
use karmandia_domain::experience::Experience;
use karmandia_domain::navigation::{ADD_EXPERIENCE_ROUTE, DASHBOARD_ROOT};
use karmandia_domain::resource::{Resource, ResourceKind};

use super::layout::{DeleteDialogView, ListSection, PageQuery, Shell, delete_href};
use super::render;
use crate::error::PageError;
use crate::flash::Flash;
use crate::state::AppState;

/// One table row.
pub struct ExperienceRow {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub delete_href: String,
}

impl ExperienceRow {
    fn from_record(experience: &Experience) -> Self {
        Self {
            title: experience.title.clone(),
            description: experience.description_text(),
            image_url: experience
                .image
                .as_ref()
                .map(|image| image.url.clone())
                .filter(|url| !url.is_empty()),
            delete_href: delete_href(ResourceKind::Experience, experience.id().as_str()),
        }
    }
}

/// Experience list page template.
#[derive(Template)]
#[template(path = "experience_list.html")]
pub struct ExperienceListTemplate {
    shell: Shell,
    add_href: &'static str,
    list: ListSection<ExperienceRow>,
    dialog: Option<DeleteDialogView>,
}

impl IntoResponse for ExperienceListTemplate {
    fn into_response(self) -> Response {
        render(&self)
    }
}

/// `GET /dashboard` — list all experiences.
pub async fn list<B, S>(
    State(state): State<AppState<B, S>>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Result<Response, PageError>
where
    B: BackendApi + Send + Sync + 'static,
    S: SessionProvider + Send + Sync + 'static,
{
    let dialog = query.delete_dialog()?;
    let credentials = state.cookie.credentials(&headers);
    let flash = Flash::from_headers(&headers);
    let experiences = state.resources.query::<Experience>(&credentials).await;

    let page = ExperienceListTemplate {
        shell: Shell::new("Experiences", DASHBOARD_ROOT, &query, flash.notice()),
        add_href: ADD_EXPERIENCE_ROUTE,
        list: ListSection::build(
            ListView::from_state(&experiences),
            ExperienceRow::from_record,
        ),
        dialog: DeleteDialogView::from_dialog(ResourceKind::Experience, &dialog),
    };
    Ok(flash.respond(page))
}
