//! Page chrome shared by every dashboard page: side navigation, notice
//! banner and the logout confirmation.

use serde::Deserialize;

use karmandia_app::services::list_view::ListView;
use karmandia_domain::dialog::{DeleteDialog, LogoutDialog};
use karmandia_domain::error::InvalidIdError;
use karmandia_domain::navigation::{DASHBOARD_ROOT, NAVIGATION, PLANNING_ROUTE};
use karmandia_domain::notice::Notice;
use karmandia_domain::resource::{Resource, ResourceKind};

/// Query parameters understood by every dashboard page.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Id of the record whose delete dialog is open.
    pub delete: Option<String>,
    /// `open` shows the logout dialog.
    pub logout: Option<String>,
}

impl PageQuery {
    #[must_use]
    pub fn logout_dialog(&self) -> LogoutDialog {
        let mut dialog = LogoutDialog::Closed;
        if self.logout.as_deref() == Some("open") {
            dialog.open();
        }
        dialog
    }

    /// The delete dialog requested by `?delete=<id>`.
    ///
    /// # Errors
    ///
    /// Returns an error when the id is malformed.
    pub fn delete_dialog(&self) -> Result<DeleteDialog, InvalidIdError> {
        let mut dialog = DeleteDialog::Closed;
        if let Some(raw) = &self.delete {
            dialog.request(raw.parse()?);
        }
        Ok(dialog)
    }
}

pub struct NavLink {
    pub name: &'static str,
    pub href: &'static str,
    pub active: bool,
}

/// Everything `base.html` needs.
pub struct Shell {
    pub title: &'static str,
    /// Path of the current page, without query.
    pub path: String,
    pub nav: Vec<NavLink>,
    pub notice: Option<Notice>,
    pub logout_open: bool,
}

impl Shell {
    #[must_use]
    pub fn new(
        title: &'static str,
        path: &str,
        query: &PageQuery,
        notice: Option<Notice>,
    ) -> Self {
        let nav = NAVIGATION
            .iter()
            .map(|entry| NavLink {
                name: entry.name,
                href: entry.href,
                active: entry.is_active(path),
            })
            .collect();
        Self {
            title,
            path: path.to_string(),
            nav,
            notice,
            logout_open: query.logout_dialog().is_open(),
        }
    }

    #[must_use]
    pub fn logout_href(&self) -> String {
        format!("{}?logout=open", self.path)
    }
}

/// List page that owns records of `kind`.
#[must_use]
pub const fn list_route(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Experience => DASHBOARD_ROOT,
        ResourceKind::Contact => PLANNING_ROUTE,
    }
}

/// Form action deleting `id` of `kind`.
#[must_use]
pub fn delete_action(kind: ResourceKind, id: &str) -> String {
    format!("/dashboard/{}/{id}/delete", kind.plural())
}

/// Link opening the delete dialog for `id`.
#[must_use]
pub fn delete_href(kind: ResourceKind, id: &str) -> String {
    format!("{}?delete={id}", list_route(kind))
}

/// The open delete dialog, as rendered.
pub struct DeleteDialogView {
    pub heading: String,
    pub action: String,
    pub cancel_href: &'static str,
}

impl DeleteDialogView {
    #[must_use]
    pub fn from_dialog(kind: ResourceKind, dialog: &DeleteDialog) -> Option<Self> {
        let target = dialog.target()?;
        Some(Self {
            heading: format!("Delete {}", kind.title()),
            action: delete_action(kind, target.as_str()),
            cancel_href: list_route(kind),
        })
    }
}

/// The three list presentations flattened for a template.
pub struct ListSection<Row> {
    pub loading: Option<String>,
    pub error: Option<String>,
    pub rows: Vec<Row>,
}

impl<Row> ListSection<Row> {
    pub fn build<R: Resource>(view: ListView<R>, row: impl Fn(&R) -> Row) -> Self {
        match view {
            ListView::Loading { message } => Self {
                loading: Some(message),
                error: None,
                rows: Vec::new(),
            },
            ListView::Error { message } => Self {
                loading: None,
                error: Some(message),
                rows: Vec::new(),
            },
            ListView::Table { rows } => Self {
                loading: None,
                error: None,
                rows: rows.iter().map(row).collect(),
            },
        }
    }

    #[must_use]
    pub fn shows_table(&self) -> bool {
        self.loading.is_none() && self.error.is_none()
    }
}
