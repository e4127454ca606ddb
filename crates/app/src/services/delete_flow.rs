//! Delete confirmation wired to the resource service.

use std::marker::PhantomData;

use karmandia_domain::dialog::DeleteDialog;
use karmandia_domain::id::RecordId;
use karmandia_domain::notice::Notice;
use karmandia_domain::resource::Resource;
use karmandia_domain::session::Credentials;

use crate::ports::BackendApi;
use crate::services::resource_service::ResourceService;

/// One delete dialog shared by every row of an `R` list.
#[derive(Debug, Clone)]
pub struct DeleteFlow<R> {
    dialog: DeleteDialog,
    resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Default for DeleteFlow<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> DeleteFlow<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::resume(DeleteDialog::Closed)
    }

    /// Continue from a dialog state carried by the previous request.
    #[must_use]
    pub fn resume(dialog: DeleteDialog) -> Self {
        Self {
            dialog,
            resource: PhantomData,
        }
    }

    #[must_use]
    pub fn dialog(&self) -> &DeleteDialog {
        &self.dialog
    }

    /// Open the dialog for `id`. Ignored while a delete is in flight.
    pub fn request(&mut self, id: RecordId) -> bool {
        self.dialog.request(id)
    }

    pub fn cancel(&mut self) -> bool {
        self.dialog.cancel()
    }

    /// Run the delete for the dialog's target.
    ///
    /// Returns `None` when the dialog was not open. On success the dialog
    /// closes; on failure it stays open on the same target so the user can
    /// retry or cancel.
    pub async fn confirm<B: BackendApi>(
        &mut self,
        service: &ResourceService<B>,
        credentials: &Credentials,
    ) -> Option<Notice> {
        let target = self.dialog.confirm()?;
        let kind = R::KIND;
        match service.delete::<R>(&target, credentials).await {
            Ok(()) => {
                tracing::info!(id = %target, resource = kind.singular(), "record deleted");
                self.dialog.resolve(true);
                Some(Notice::success(kind.deleted_message()))
            }
            Err(err) => {
                tracing::warn!(id = %target, resource = kind.singular(), error = %err, "delete failed");
                self.dialog.resolve(false);
                Some(Notice::error(kind.delete_failed_message()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use karmandia_domain::contact::Contact;
    use karmandia_domain::experience::Experience;
    use karmandia_domain::notice::NoticeLevel;
    use karmandia_domain::resource::ResourceKind;

    use super::*;
    use crate::query_cache::QueryCache;
    use crate::services::testing::{Call, FakeBackend, Failure, contact_json, experience_json};

    fn id(value: &str) -> RecordId {
        value.parse().unwrap()
    }

    fn experiences() -> Arc<FakeBackend> {
        Arc::new(FakeBackend::with_records(
            ResourceKind::Experience,
            vec![experience_json("a1", "Surf"), experience_json("b2", "Hike")],
        ))
    }

    #[tokio::test]
    async fn should_delete_target_and_close() {
        let backend = experiences();
        let service = ResourceService::new(Arc::clone(&backend), Arc::new(QueryCache::new()));
        let mut flow = DeleteFlow::<Experience>::new();
        flow.request(id("a1"));

        let notice = flow.confirm(&service, &Credentials::anonymous()).await.unwrap();

        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.message, "Experience deleted successfully");
        assert_eq!(flow.dialog(), &DeleteDialog::Closed);
        assert!(backend.calls().contains(&Call::Delete {
            kind: ResourceKind::Experience,
            id: id("a1"),
        }));
    }

    #[tokio::test]
    async fn should_stay_open_on_failure() {
        let backend = Arc::new(FakeBackend::with_records(
            ResourceKind::Contact,
            vec![contact_json("c1", "ana")],
        ));
        backend.fail_delete(Some(Failure::Status(500)));
        let service = ResourceService::new(Arc::clone(&backend), Arc::new(QueryCache::new()));
        let mut flow = DeleteFlow::<Contact>::new();
        flow.request(id("c1"));

        let notice = flow.confirm(&service, &Credentials::anonymous()).await.unwrap();

        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Failed to delete contact");
        assert_eq!(flow.dialog(), &DeleteDialog::open_for(id("c1")));
    }

    #[tokio::test]
    async fn should_do_nothing_when_closed() {
        let backend = experiences();
        let service = ResourceService::new(Arc::clone(&backend), Arc::new(QueryCache::new()));
        let mut flow = DeleteFlow::<Experience>::new();

        assert!(flow.confirm(&service, &Credentials::anonymous()).await.is_none());
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn should_not_delete_after_cancel() {
        let backend = experiences();
        let service = ResourceService::new(Arc::clone(&backend), Arc::new(QueryCache::new()));
        let mut flow = DeleteFlow::<Experience>::new();
        flow.request(id("a1"));
        assert!(flow.cancel());

        assert!(flow.confirm(&service, &Credentials::anonymous()).await.is_none());
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn should_ignore_requests_while_pending() {
        let mut flow = DeleteFlow::<Experience>::resume(DeleteDialog::Pending { target: id("a1") });
        assert!(!flow.request(id("b2")));
        assert_eq!(flow.dialog().target(), Some(&id("a1")));
    }

    #[test]
    fn should_retarget_open_dialog() {
        let mut flow = DeleteFlow::<Experience>::new();
        flow.request(id("a1"));
        flow.request(id("b2"));
        assert_eq!(flow.dialog(), &DeleteDialog::open_for(id("b2")));
    }
}
