//! Note form validation.
//!
//! Cleans the raw `title`/`text`/`slug` submission into [`NoteContent`]. An
//! omitted or blank slug is derived from the title. Global slug uniqueness
//! needs storage and is checked by the note service; its message is built by
//! [`duplicate_slug_message`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::auth::REQUIRED_FIELD;
use super::note::TITLE_MAX_LEN;
use super::{FieldErrors, NoteContent, NoteSlug, SlugValidationError};

/// Suffix appended to a colliding slug to form the validation message.
pub const WARNING: &str = " - такой slug уже существует, придумайте уникальное значение!";

/// Message used when no slug can be derived from the title.
pub const UNDERIVABLE_SLUG: &str =
    "Could not build a slug from the title; enter one explicitly.";

/// Validation message for a slug already used by another note.
///
/// # Examples
/// ```
/// use notes_backend::domain::{duplicate_slug_message, NoteSlug, WARNING};
///
/// let slug = NoteSlug::new("note_1").unwrap();
/// assert_eq!(duplicate_slug_message(&slug), format!("note_1{WARNING}"));
/// ```
pub fn duplicate_slug_message(slug: &NoteSlug) -> String {
    format!("{slug}{WARNING}")
}

/// Raw note form as submitted by the client.
///
/// Every field defaults to empty so a missing field is reported as a
/// validation error instead of a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NoteForm {
    #[serde(default)]
    #[schema(example = "Заголовок")]
    pub title: String,
    #[serde(default)]
    #[schema(example = "Текст заметки")]
    pub text: String,
    #[serde(default)]
    #[schema(example = "note-slug")]
    pub slug: Option<String>,
}

impl NoteForm {
    /// Pre-fill a form with the current values of a note.
    pub fn from_content(content: &NoteContent) -> Self {
        Self {
            title: content.title().to_owned(),
            text: content.text().to_owned(),
            slug: Some(content.slug().to_string()),
        }
    }

    /// Validate the submission without consulting storage.
    ///
    /// Surrounding whitespace is stripped from every field. Required-field,
    /// length and slug-format errors are collected together.
    ///
    /// # Examples
    /// ```
    /// use notes_backend::domain::NoteForm;
    ///
    /// let form = NoteForm {
    ///     title: "Заголовок".into(),
    ///     text: "Текст".into(),
    ///     slug: None,
    /// };
    /// let content = form.clean().unwrap();
    /// assert_eq!(content.slug().as_str(), "zagolovok");
    /// ```
    pub fn clean(&self) -> Result<NoteContent, FieldErrors> {
        let mut errors = FieldErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.add("title", REQUIRED_FIELD);
        } else if title.chars().count() > TITLE_MAX_LEN {
            errors.add(
                "title",
                format!("Ensure this value has at most {TITLE_MAX_LEN} characters."),
            );
        }

        let text = self.text.trim();
        if text.is_empty() {
            errors.add("text", REQUIRED_FIELD);
        }

        let submitted_slug = self.slug.as_deref().map(str::trim).unwrap_or_default();
        let slug = if submitted_slug.is_empty() {
            // Derivation only makes sense once the title itself is usable.
            if errors.get("title").is_some() {
                None
            } else {
                match NoteSlug::from_title(title) {
                    Ok(slug) => Some(slug),
                    Err(SlugValidationError::Empty) => {
                        errors.add("slug", UNDERIVABLE_SLUG);
                        None
                    }
                    Err(err) => {
                        errors.add("slug", err.to_string());
                        None
                    }
                }
            }
        } else {
            match NoteSlug::new(submitted_slug) {
                Ok(slug) => Some(slug),
                Err(err) => {
                    errors.add("slug", err.to_string());
                    None
                }
            }
        };

        match slug {
            Some(slug) if errors.is_empty() => {
                Ok(NoteContent::new(title.to_owned(), text.to_owned(), slug))
            }
            _ => Err(errors),
        }
    }
}
