//! Declarative field rules for form input.

use std::fmt;

/// A form field that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    Image,
}

impl Field {
    /// Name of the field in the HTML form.
    #[must_use]
    pub const fn form_name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Image => "image",
        }
    }
}

/// A single rule applied to a text value.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// At least this many characters.
    MinChars(usize, &'static str),
    /// At most this many characters.
    MaxChars(usize, &'static str),
}

impl Rule {
    /// Return the rule's message when `value` violates it.
    #[must_use]
    pub fn check(self, value: &str) -> Option<&'static str> {
        let len = value.chars().count();
        match self {
            Self::MinChars(min, message) if len < min => Some(message),
            Self::MaxChars(max, message) if len > max => Some(message),
            _ => None,
        }
    }
}

/// Apply `rules` in order and return the first violation.
#[must_use]
pub fn first_violation(rules: &[Rule], value: &str) -> Option<&'static str> {
    rules.iter().find_map(|rule| rule.check(value))
}

/// A failed rule attached to its field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Every field that failed validation, at most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    /// Record a failure for `field` unless that field already has one.
    pub fn push(&mut self, field: Field, message: &'static str) {
        if self.for_field(field).is_none() {
            self.0.push(FieldError { field, message });
        }
    }

    /// Message attached to `field`, if any.
    #[must_use]
    pub fn for_field(&self, field: Field) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// `Ok(())` when nothing failed, `Err(self)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field.form_name(), error.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}
