//! Contact — a planning enquiry left by a prospective guest.

use serde::{Deserialize, Serialize};

use crate::id::RecordId;
use crate::resource::{Resource, ResourceKind};
use crate::rich_text;

/// A contact as returned by `GET /contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "homeBase", default)]
    pub home_base: String,
    #[serde(default)]
    pub instagram: String,
    #[serde(default)]
    pub description: String,
}

impl Contact {
    /// The description with any markup removed.
    #[must_use]
    pub fn description_text(&self) -> String {
        rich_text::to_plain_text(&self.description)
    }
}

impl Resource for Contact {
    const KIND: ResourceKind = ResourceKind::Contact;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_deserialize_backend_payload() {
        let json = r#"{
            "_id": "c1",
            "name": "Ada",
            "email": "ada@example.com",
            "homeBase": "Lisbon",
            "instagram": "@ada",
            "description": "Two weeks in June"
        }"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.home_base, "Lisbon");
        assert_eq!(contact.instagram, "@ada");
        assert_eq!(contact.id(), &"c1".parse::<RecordId>().unwrap());
    }

    #[test]
    fn should_default_missing_fields() {
        let contact: Contact = serde_json::from_str(r#"{"_id": "c2"}"#).unwrap();
        assert!(contact.name.is_empty());
        assert!(contact.home_base.is_empty());
    }

    #[test]
    fn should_strip_markup_from_description() {
        let contact: Contact =
            serde_json::from_str(r#"{"_id": "c3", "description": "<img src=x onerror=alert(1)>Hello"}"#)
                .unwrap();
        assert_eq!(contact.description_text(), "Hello");
    }
}
