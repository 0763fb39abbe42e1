//! Field-level validation outcomes shared by every submitted form.
//!
//! A rejected form is not an error page: the adapter re-renders the form with
//! the submitted values and these messages, keyed by field name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Error;

/// Key used for errors that do not belong to a single field.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Validation messages keyed by form field.
///
/// # Examples
/// ```
/// use notes_backend::domain::FieldErrors;
///
/// let mut errors = FieldErrors::default();
/// errors.add("slug", "taken");
/// assert_eq!(errors.get("slug"), Some(&["taken".to_owned()][..]));
/// assert!(!errors.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Build errors holding a single message for `field`.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    /// Append a message for `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// Messages recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Return `true` when no field carries a message.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Outcome of a rejected form submission.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    /// The submission failed validation; nothing was persisted.
    #[error("form is invalid")]
    Invalid(FieldErrors),
    /// The submission could not be processed.
    #[error(transparent)]
    Failed(#[from] Error),
}

impl From<FieldErrors> for FormError {
    fn from(value: FieldErrors) -> Self {
        Self::Invalid(value)
    }
}
