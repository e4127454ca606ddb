//! Cached access to the backend collections.

use std::sync::Arc;

use karmandia_domain::error::KarmandiaError;
use karmandia_domain::experience::{CreateReceipt, NewExperience};
use karmandia_domain::id::RecordId;
use karmandia_domain::resource::{QueryKey, Resource};
use karmandia_domain::session::Credentials;

use crate::ports::BackendApi;
use crate::query_cache::{CachedEntry, QueryCache, QueryStatus, Reader};

/// What a list view sees of a collection query.
#[derive(Debug)]
pub struct QueryState<R> {
    pub data: Option<Arc<Vec<R>>>,
    /// No data yet and the first fetch has not finished successfully.
    pub is_loading: bool,
    pub is_error: bool,
    pub error: Option<String>,
}

impl<R> Clone for QueryState<R> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            is_loading: self.is_loading,
            is_error: self.is_error,
            error: self.error.clone(),
        }
    }
}

impl<R> QueryState<R> {
    fn loading() -> Self {
        Self {
            data: None,
            is_loading: true,
            is_error: false,
            error: None,
        }
    }

    fn ready(rows: Arc<Vec<R>>) -> Self {
        Self {
            data: Some(rows),
            is_loading: false,
            is_error: false,
            error: None,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            data: None,
            is_loading: false,
            is_error: true,
            error: Some(message),
        }
    }

    fn from_entry(entry: CachedEntry<R>) -> Self {
        let (is_loading, error) = match entry.status {
            QueryStatus::Loading => (entry.data.is_none(), None),
            QueryStatus::Success => (false, None),
            QueryStatus::Error(message) => (false, Some(message)),
        };
        Self {
            data: entry.data,
            is_loading,
            is_error: error.is_some(),
            error,
        }
    }
}

/// Reads collections through the shared [`QueryCache`] and keeps it coherent
/// after mutations.
pub struct ResourceService<B> {
    backend: B,
    cache: Arc<QueryCache>,
}

impl<B: BackendApi> ResourceService<B> {
    pub fn new(backend: B, cache: Arc<QueryCache>) -> Self {
        Self { backend, cache }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Current state of `R`'s collection, fetching it when the cached copy is
    /// missing, stale, failed or past its freshness window.
    ///
    /// Collections the backend authorises per caller are always fetched with
    /// `credentials`, unless this caller's own delete just refreshed them.
    #[tracing::instrument(skip_all, fields(resource = R::KIND.plural()))]
    pub async fn query<R: Resource>(&self, credentials: &Credentials) -> QueryState<R> {
        let key = R::KIND.query_key();
        if let Some(entry) = self.cache.take_next_read::<R>(key, credentials) {
            tracing::trace!("serving collection refreshed by the last mutation");
            return QueryState::from_entry(entry);
        }
        if self.backend.list_requires_auth(R::KIND) || self.cache.needs_fetch(key) {
            return self.refetch::<R>(credentials).await;
        }
        tracing::trace!("serving cached collection");
        self.snapshot::<R>()
    }

    /// Fetch `R`'s collection unconditionally and store the outcome.
    pub async fn refetch<R: Resource>(&self, credentials: &Credentials) -> QueryState<R> {
        self.fetch::<R>(credentials, None).await
    }

    /// The returned state is this caller's own outcome, whatever concurrent
    /// fetches wrote to the cache meanwhile.
    async fn fetch<R: Resource>(
        &self,
        credentials: &Credentials,
        next_read: Option<Reader>,
    ) -> QueryState<R> {
        let kind = R::KIND;
        let key = kind.query_key();
        self.cache.begin_fetch(key);
        match self.backend.list::<R>(credentials).await {
            Ok(envelope) => {
                tracing::debug!(%key, count = envelope.data.len(), "fetched collection");
                let rows = Arc::new(envelope.data);
                self.cache.store(key, Arc::clone(&rows), next_read);
                QueryState::ready(rows)
            }
            Err(err) => {
                tracing::warn!(%key, error = %err, "failed to fetch collection");
                self.cache.set_error(key, kind.load_error_message());
                if self.backend.list_requires_auth(kind) {
                    QueryState::failed(kind.load_error_message())
                } else {
                    self.snapshot::<R>()
                }
            }
        }
    }

    fn snapshot<R: Resource>(&self) -> QueryState<R> {
        self.cache
            .get::<R>(R::KIND.query_key())
            .map_or_else(QueryState::loading, QueryState::from_entry)
    }

    /// Delete one record, then invalidate and refetch its collection once.
    ///
    /// The refetched collection is handed to the next read, so the list page
    /// shown after the delete does not fetch it again.
    ///
    /// # Errors
    ///
    /// Returns the backend error when the delete fails; the cache is left
    /// untouched in that case.
    #[tracing::instrument(skip(self, credentials), fields(resource = R::KIND.singular()))]
    pub async fn delete<R: Resource>(
        &self,
        id: &RecordId,
        credentials: &Credentials,
    ) -> Result<(), KarmandiaError> {
        self.backend.delete(R::KIND, id, credentials).await?;
        self.cache.invalidate(R::KIND.query_key());
        let reader = if self.backend.list_requires_auth(R::KIND) {
            Reader::Holder(credentials.clone())
        } else {
            Reader::Anyone
        };
        self.fetch::<R>(credentials, Some(reader)).await;
        Ok(())
    }

    /// Upload a validated experience and invalidate the experience list.
    ///
    /// # Errors
    ///
    /// Returns the backend error when the upload fails.
    #[tracing::instrument(skip_all, fields(title = experience.title()))]
    pub async fn create_experience(
        &self,
        experience: &NewExperience,
        credentials: &Credentials,
    ) -> Result<CreateReceipt, KarmandiaError> {
        let receipt = self
            .backend
            .create_experience(experience, credentials)
            .await?;
        self.cache.invalidate(QueryKey::Experiences);
        Ok(receipt)
    }
}
