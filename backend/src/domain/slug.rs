//! Note slugs: validation and derivation from titles.
//!
//! Slugs are non-empty identifiers composed of lowercase ASCII letters,
//! digits, hyphens and underscores, at most [`SLUG_MAX_LEN`] characters long.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum slug length in characters.
pub const SLUG_MAX_LEN: usize = 100;

/// Validation errors for [`NoteSlug`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugValidationError {
    #[error("slug must not be empty")]
    Empty,
    #[error("Ensure this value has at most {max} characters.")]
    TooLong { max: usize },
    #[error(
        "Enter a valid “slug” consisting of lowercase letters, numbers, underscores or hyphens."
    )]
    InvalidCharacters,
}

/// URL-safe, globally unique note identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "note-slug")]
pub struct NoteSlug(String);

impl NoteSlug {
    /// Validate and construct a slug.
    ///
    /// # Examples
    /// ```
    /// use notes_backend::domain::NoteSlug;
    ///
    /// assert!(NoteSlug::new("note_1").is_ok());
    /// assert!(NoteSlug::new("Note 1").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, SlugValidationError> {
        let value = value.into();
        Self::check(&value)?;
        Ok(Self(value))
    }

    /// Derive a slug from a note title.
    ///
    /// Fails with [`SlugValidationError::Empty`] when nothing URL-safe is left
    /// of the title.
    ///
    /// # Examples
    /// ```
    /// use notes_backend::domain::NoteSlug;
    ///
    /// let slug = NoteSlug::from_title("Заголовок").unwrap();
    /// assert_eq!(slug.as_str(), "zagolovok");
    /// ```
    pub fn from_title(title: &str) -> Result<Self, SlugValidationError> {
        Self::new(slugify(title))
    }

    fn check(value: &str) -> Result<(), SlugValidationError> {
        if value.is_empty() {
            return Err(SlugValidationError::Empty);
        }
        if value.chars().count() > SLUG_MAX_LEN {
            return Err(SlugValidationError::TooLong { max: SLUG_MAX_LEN });
        }
        let allowed = value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_');
        if !allowed {
            return Err(SlugValidationError::InvalidCharacters);
        }
        Ok(())
    }

    /// Borrow the slug text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for NoteSlug {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for NoteSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<NoteSlug> for String {
    fn from(value: NoteSlug) -> Self {
        value.0
    }
}

impl TryFrom<String> for NoteSlug {
    type Error = SlugValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Transliterate `value` to ASCII and turn it into a slug.
///
/// Characters other than word characters, whitespace and hyphens are dropped,
/// runs of whitespace and hyphens collapse to one hyphen, leading and trailing
/// hyphens and underscores are stripped, and the result is truncated to
/// [`SLUG_MAX_LEN`] characters. The output may be empty.
///
/// # Examples
/// ```
/// use notes_backend::domain::slugify;
///
/// assert_eq!(slugify("  Hello, World!  "), "hello-world");
/// assert_eq!(slugify("Текст заметки"), "tekst-zametki");
/// assert_eq!(slugify("a -.- b"), "a-b");
/// ```
pub fn slugify(value: &str) -> String {
    let ascii = deunicode::deunicode(value);
    let mut out = String::with_capacity(ascii.len());
    let mut pending_separator = false;
    for ch in ascii.chars() {
        let lc = ch.to_ascii_lowercase();
        if lc.is_ascii_alphanumeric() || lc == '_' {
            if pending_separator {
                out.push('-');
                pending_separator = false;
            }
            out.push(lc);
        } else if lc == '-' || lc.is_ascii_whitespace() {
            pending_separator = true;
        }
    }
    let trimmed = out.trim_matches(|ch| ch == '-' || ch == '_');
    trimmed.chars().take(SLUG_MAX_LEN).collect()
}
