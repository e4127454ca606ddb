//! Generic description of a backend resource collection.
//!
//! Both record types follow the same list/delete shape; everything that
//! differs between them (paths, cache key, wording) hangs off [`ResourceKind`].

use std::fmt;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::id::RecordId;

/// Cache key under which a fetched collection is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Experiences,
    Contacts,
}

impl QueryKey {
    /// Wire-stable name of the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Experiences => "experiences",
            Self::Contacts => "contact",
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kinds of record the dashboard manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Experience,
    Contact,
}

impl ResourceKind {
    /// Cache key for this kind's collection.
    #[must_use]
    pub const fn query_key(self) -> QueryKey {
        match self {
            Self::Experience => QueryKey::Experiences,
            Self::Contact => QueryKey::Contacts,
        }
    }

    /// Lower-case singular noun used in messages.
    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Experience => "experience",
            Self::Contact => "contact",
        }
    }

    /// Lower-case plural noun used in messages.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Experience => "experiences",
            Self::Contact => "contacts",
        }
    }

    /// Backend path of the collection (`GET`).
    #[must_use]
    pub const fn collection_path(self) -> &'static str {
        match self {
            Self::Experience => "/experience",
            Self::Contact => "/contact",
        }
    }

    /// Backend path deleting a single record (`DELETE`).
    #[must_use]
    pub fn delete_path(self, id: &RecordId) -> String {
        format!("{}/delete/{id}", self.collection_path())
    }

    /// Placeholder shown while the collection is loading.
    #[must_use]
    pub fn loading_message(self) -> String {
        format!("Loading {}...", self.plural())
    }

    /// Fixed message shown when the collection could not be fetched.
    #[must_use]
    pub fn load_error_message(self) -> String {
        format!("Failed to load {}. Please refresh.", self.plural())
    }

    /// Capitalised singular noun, as used in headings.
    #[must_use]
    pub fn title(self) -> String {
        let noun = self.singular();
        let mut chars = noun.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Notice shown after a successful delete.
    #[must_use]
    pub fn deleted_message(self) -> String {
        format!("{} deleted successfully", self.title())
    }

    /// Notice shown after a failed delete.
    #[must_use]
    pub fn delete_failed_message(self) -> String {
        format!("Failed to delete {}", self.singular())
    }
}

/// A record type fetched as a collection and deletable by id.
pub trait Resource: Clone + DeserializeOwned + Send + Sync + 'static {
    /// Which backend collection this record lives in.
    const KIND: ResourceKind;

    /// The record's backend identifier.
    fn id(&self) -> &RecordId;
}

/// Response wrapper the backend puts around every collection.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn should_map_kinds_to_cache_keys() {
        assert_eq!(ResourceKind::Experience.query_key().as_str(), "experiences");
        assert_eq!(ResourceKind::Contact.query_key().as_str(), "contact");
    }

    #[test]
    fn should_build_delete_paths() {
        let id = RecordId::from_str("abc123").unwrap();
        assert_eq!(
            ResourceKind::Experience.delete_path(&id),
            "/experience/delete/abc123"
        );
        assert_eq!(ResourceKind::Contact.delete_path(&id), "/contact/delete/abc123");
    }

    #[test]
    fn should_word_messages_per_kind() {
        assert_eq!(
            ResourceKind::Experience.load_error_message(),
            "Failed to load experiences. Please refresh."
        );
        assert_eq!(
            ResourceKind::Contact.load_error_message(),
            "Failed to load contacts. Please refresh."
        );
        assert_eq!(
            ResourceKind::Contact.deleted_message(),
            "Contact deleted successfully"
        );
        assert_eq!(
            ResourceKind::Experience.delete_failed_message(),
            "Failed to delete experience"
        );
        assert_eq!(
            ResourceKind::Experience.loading_message(),
            "Loading experiences..."
        );
    }

    #[test]
    fn should_title_case_singular_noun() {
        assert_eq!(ResourceKind::Experience.title(), "Experience");
        assert_eq!(ResourceKind::Contact.title(), "Contact");
    }

    #[test]
    fn should_default_missing_envelope_fields() {
        let envelope: Envelope<serde_json::Value> = serde_json::from_str("{}").unwrap();
        assert!(!envelope.success);
        assert!(envelope.message.is_empty());
        assert!(envelope.data.is_empty());
    }
}
