//! Dashboard page listing planning contacts.

use askama::Template;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};

use karmandia_app::ports::{BackendApi, SessionProvider};
use karmandia_app::services::list_view::ListView;
use karmandia_domain::contact::Contact;
use karmandia_domain::navigation::PLANNING_ROUTE;
use karmandia_domain::resource::{Resource, ResourceKind};

use super::layout::{DeleteDialogView, ListSection, PageQuery, Shell, delete_href};
use super::render;
use crate::error::PageError;
use crate::flash::Flash;
use crate::state::AppState;

pub struct ContactRow {
    pub name: String,
    pub email: String,
    pub home_base: String,
    pub instagram: String,
    pub description: String,
    pub delete_href: String,
}

impl ContactRow {
    fn from_record(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            email: contact.email.clone(),
            home_base: contact.home_base.clone(),
            instagram: contact.instagram.clone(),
            description: contact.description_text(),
            delete_href: delete_href(ResourceKind::Contact, contact.id().as_str()),
        }
    }
}

/// Contact list page template.
#[derive(Template)]
#[template(path = "contact_list.html")]
pub struct ContactListTemplate {
    shell: Shell,
    list: ListSection<ContactRow>,
    dialog: Option<DeleteDialogView>,
}

impl IntoResponse for ContactListTemplate {
    fn into_response(self) -> Response {
        render(&self)
    }
}

/// `GET /dashboard/planning` — list all planning contacts.
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
    let contacts = state.resources.query::<Contact>(&credentials).await;

    let page = ContactListTemplate {
        shell: Shell::new("Contacts", PLANNING_ROUTE, &query, flash.notice()),
        list: ListSection::build(ListView::from_state(&contacts), ContactRow::from_record),
        dialog: DeleteDialogView::from_dialog(ResourceKind::Contact, &dialog),
    };
    Ok(flash.respond(page))
}
