//! Delete confirmation shared by both list pages.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;

use karmandia_app::ports::{BackendApi, SessionProvider};
use karmandia_app::services::delete_flow::DeleteFlow;
use karmandia_domain::dialog::DeleteDialog;
use karmandia_domain::id::RecordId;
use karmandia_domain::resource::Resource;

use super::layout::list_route;
use super::location;
use crate::error::PageError;
use crate::flash;
use crate::state::AppState;

/// `POST /dashboard/{kind}/{id}/delete` — the dialog's Delete button.
///
/// Redirects back to the list with the outcome in the notice cookie. A failed
/// delete reopens the dialog on the same record.
pub async fn delete<B, S, R>(
    State(state): State<AppState<B, S>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, PageError>
where
    B: BackendApi + Send + Sync + 'static,
    S: SessionProvider + Send + Sync + 'static,
    R: Resource,
{
    let id: RecordId = id.parse()?;
    let credentials = state.cookie.credentials(&headers);
    let list = list_route(R::KIND);

    let mut flow = DeleteFlow::<R>::resume(DeleteDialog::open_for(id));
    let notice = flow.confirm(&state.resources, &credentials).await;

    let target = match flow.dialog().target() {
        Some(open) => location(list, &[("delete", open.as_str())]),
        None => list.to_string(),
    };
    Ok(flash::redirect(&target, notice.as_ref()))
}
