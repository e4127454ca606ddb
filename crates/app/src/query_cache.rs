//! Keyed store of fetched collections.
//!
//! Entries are only ever replaced wholesale. Invalidation marks an entry
//! stale but keeps its data so a list can still be shown while it refetches.
//! A fetch that completes after an invalidation still writes through: the
//! last write for a key wins, regardless of which request started first.
//!
//! A write can also be handed to the next read of its key, which then skips
//! the freshness window once. That read may be restricted to the credentials
//! that fetched the data.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::TimeDelta;
use karmandia_domain::resource::QueryKey;
use karmandia_domain::session::Credentials;
use karmandia_domain::time::{Timestamp, expired, now};

/// Outcome of the most recent fetch for a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStatus {
    /// Nothing fetched yet.
    Loading,
    Success,
    /// The last fetch failed with this user-facing message.
    Error(String),
}

/// Snapshot of one cache entry.
#[derive(Debug)]
pub struct CachedEntry<T> {
    pub data: Option<Arc<Vec<T>>>,
    pub status: QueryStatus,
    pub is_fetching: bool,
    pub stale: bool,
    pub updated_at: Option<Timestamp>,
}

impl<T> Clone for CachedEntry<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            status: self.status.clone(),
            is_fetching: self.is_fetching,
            stale: self.stale,
            updated_at: self.updated_at,
        }
    }
}

/// Who may take an entry handed to the next read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reader {
    Anyone,
    /// Only a read made with these credentials.
    Holder(Credentials),
}

impl Reader {
    fn admits(&self, credentials: &Credentials) -> bool {
        match self {
            Self::Anyone => true,
            Self::Holder(holder) => holder == credentials,
        }
    }
}

type Erased = Arc<dyn Any + Send + Sync>;

struct Slot {
    data: Option<Erased>,
    status: QueryStatus,
    is_fetching: bool,
    stale: bool,
    updated_at: Option<Timestamp>,
    next_read: Option<Reader>,
}

impl Slot {
    fn entry<T: Send + Sync + 'static>(&self) -> Option<CachedEntry<T>> {
        let data = match &self.data {
            Some(erased) => Some(Arc::clone(erased).downcast::<Vec<T>>().ok()?),
            None => None,
        };
        Some(CachedEntry {
            data,
            status: self.status.clone(),
            is_fetching: self.is_fetching,
            stale: self.stale,
            updated_at: self.updated_at,
        })
    }
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            data: None,
            status: QueryStatus::Loading,
            is_fetching: false,
            stale: false,
            updated_at: None,
            next_read: None,
        }
    }
}

/// Shared cache of collections, keyed by [`QueryKey`].
pub struct QueryCache {
    slots: RwLock<HashMap<QueryKey, Slot>>,
    stale_after: TimeDelta,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    /// A cache whose entries are refetched on every read.
    #[must_use]
    pub fn new() -> Self {
        Self::with_stale_after(TimeDelta::zero())
    }

    /// A cache whose successful entries are served without refetching for
    /// `window` after they were written.
    #[must_use]
    pub fn with_stale_after(window: TimeDelta) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            stale_after: window,
        }
    }

    /// Snapshot the entry for `key`.
    ///
    /// Returns `None` when nothing was ever recorded for the key, or when the
    /// stored data is not a `Vec<T>`.
    #[must_use]
    pub fn get<T: Send + Sync + 'static>(&self, key: QueryKey) -> Option<CachedEntry<T>> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.get(&key)?.entry()
    }

    /// Take the entry handed to the next read of `key`, if `credentials`
    /// may read it.
    ///
    /// The hand-off is consumed by the first read of the key, whether or not
    /// that read is admitted.
    #[must_use]
    pub fn take_next_read<T: Send + Sync + 'static>(
        &self,
        key: QueryKey,
        credentials: &Credentials,
    ) -> Option<CachedEntry<T>> {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        let slot = slots.get_mut(&key)?;
        let reader = slot.next_read.take()?;
        if slot.stale || slot.status != QueryStatus::Success || !reader.admits(credentials) {
            return None;
        }
        slot.entry()
    }

    /// Record that a fetch for `key` has started.
    pub fn begin_fetch(&self, key: QueryKey) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        let slot = slots.entry(key).or_default();
        slot.is_fetching = true;
        if slot.data.is_none() {
            slot.status = QueryStatus::Loading;
        }
    }

    /// Replace the entry for `key` with freshly fetched data.
    pub fn set<T: Send + Sync + 'static>(&self, key: QueryKey, data: Vec<T>) {
        self.store(key, Arc::new(data), None);
    }

    /// Replace the entry for `key`, optionally handing it to the next read.
    pub fn store<T: Send + Sync + 'static>(
        &self,
        key: QueryKey,
        data: Arc<Vec<T>>,
        next_read: Option<Reader>,
    ) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.insert(
            key,
            Slot {
                data: Some(data),
                status: QueryStatus::Success,
                is_fetching: false,
                stale: false,
                updated_at: Some(now()),
                next_read,
            },
        );
    }

    /// Record a failed fetch. Previously cached data is kept.
    pub fn set_error(&self, key: QueryKey, message: impl Into<String>) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        let slot = slots.entry(key).or_default();
        slot.status = QueryStatus::Error(message.into());
        slot.is_fetching = false;
        slot.next_read = None;
    }

    /// Mark `key` stale so the next read refetches it.
    ///
    /// Returns whether an entry existed.
    pub fn invalidate(&self, key: QueryKey) -> bool {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        match slots.get_mut(&key) {
            Some(slot) => {
                slot.stale = true;
                slot.next_read = None;
                true
            }
            None => false,
        }
    }

    /// Whether a read of `key` should go to the network.
    #[must_use]
    pub fn needs_fetch(&self, key: QueryKey) -> bool {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        let Some(slot) = slots.get(&key) else {
            return true;
        };
        slot.stale
            || slot.status != QueryStatus::Success
            || slot
                .updated_at
                .is_none_or(|written| expired(written, self.stale_after, now()))
    }
}
