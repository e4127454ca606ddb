//! Which of the three list presentations to render.

use std::sync::Arc;

use karmandia_domain::resource::Resource;

use crate::services::resource_service::QueryState;

#[derive(Debug)]
pub enum ListView<R> {
    Loading { message: String },
    Error { message: String },
    Table { rows: Arc<Vec<R>> },
}

impl<R: Resource> ListView<R> {
    /// Loading wins over error; an error wins over stale rows.
    #[must_use]
    pub fn from_state(state: &QueryState<R>) -> Self {
        let kind = R::KIND;
        if state.is_loading {
            return Self::Loading {
                message: kind.loading_message(),
            };
        }
        if state.is_error {
            return Self::Error {
                message: state
                    .error
                    .clone()
                    .unwrap_or_else(|| kind.load_error_message()),
            };
        }
        Self::Table {
            rows: state.data.clone().unwrap_or_default(),
        }
    }

    /// Number of table rows, `None` unless the table is shown.
    #[must_use]
    pub fn row_count(&self) -> Option<usize> {
        match self {
            Self::Table { rows } => Some(rows.len()),
            Self::Loading { .. } | Self::Error { .. } => None,
        }
    }
}
