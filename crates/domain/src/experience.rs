//! Experience — a titled, illustrated entry with a rich-text description.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::RecordId;
use crate::resource::{Resource, ResourceKind};
use crate::rich_text;
use crate::validation::{Field, FormErrors, Rule, first_violation};

/// Title rules for new experiences.
pub const TITLE_RULES: &[Rule] = &[Rule::MinChars(2, "Title must be at least 2 characters.")];

/// Description rules for new experiences.
pub const DESCRIPTION_RULES: &[Rule] = &[
    Rule::MinChars(10, "Description must be at least 10 characters"),
    Rule::MaxChars(200, "Description must not exceed 200 characters"),
];

/// Message for an attached file that is not an image.
pub const IMAGE_TYPE_MESSAGE: &str = "Only image files are allowed";

/// Image stored by the backend's media host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageRef {
    pub url: String,
    pub public_id: String,
}

/// An experience as returned by `GET /experience`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    /// Rich-text HTML fragment. The backend spells the field `desccription`.
    #[serde(rename = "desccription", default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<ImageRef>,
    #[serde(rename = "__v", alias = "v", default)]
    pub version: u32,
}

impl Experience {
    /// The description with all markup removed.
    #[must_use]
    pub fn description_text(&self) -> String {
        rich_text::to_plain_text(&self.description)
    }
}

impl Resource for Experience {
    const KIND: ResourceKind = ResourceKind::Experience;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// A file picked in the create form.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Whether the declared MIME type is an image type.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Raw create-form input, possibly invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperienceDraft {
    pub title: String,
    pub description: String,
    pub image: Option<ImageUpload>,
}

impl ExperienceDraft {
    /// Check every field and collect all failures.
    ///
    /// # Errors
    ///
    /// Returns [`FormErrors`] listing each failing field.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        if let Some(message) = first_violation(TITLE_RULES, &self.title) {
            errors.push(Field::Title, message);
        }
        if let Some(message) = first_violation(DESCRIPTION_RULES, &self.description) {
            errors.push(Field::Description, message);
        }
        if self.image.as_ref().is_some_and(|image| !image.is_image()) {
            errors.push(Field::Image, IMAGE_TYPE_MESSAGE);
        }
        errors.into_result()
    }

    /// Validate and turn the draft into a submittable [`NewExperience`].
    ///
    /// # Errors
    ///
    /// Returns the draft back with its [`FormErrors`] when validation fails.
    pub fn into_validated(self) -> Result<NewExperience, (Self, FormErrors)> {
        match self.validate() {
            Ok(()) => Ok(NewExperience(self)),
            Err(errors) => Err((self, errors)),
        }
    }
}

/// A draft that passed validation. Only constructible through
/// [`ExperienceDraft::into_validated`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExperience(ExperienceDraft);

impl NewExperience {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.0.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.0.description
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageUpload> {
        self.0.image.as_ref()
    }

    /// Give the values back for re-display, e.g. after a failed submit.
    #[must_use]
    pub fn into_draft(self) -> ExperienceDraft {
        self.0
    }
}

/// Body of a successful `POST /experience/create`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateReceipt {
    #[serde(default)]
    pub message: Option<String>,
}
