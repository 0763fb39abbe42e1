//! Note aggregate.
//!
//! A note belongs to exactly one author, fixed at creation. Its slug is the
//! public identifier used in URLs; [`NoteId`] is the stable storage key so a
//! slug can be changed by an edit.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{NoteSlug, UserId};

/// Maximum title length in characters.
pub const TITLE_MAX_LEN: usize = 100;

/// Stable storage identifier of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated, user-editable part of a note.
///
/// Built by the note form validator; holds a non-empty title of at most
/// [`TITLE_MAX_LEN`] characters, non-empty text and a valid slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteContent {
    title: String,
    text: String,
    slug: NoteSlug,
}

impl NoteContent {
    pub(crate) fn new(title: String, text: String, slug: NoteSlug) -> Self {
        Self { title, text, slug }
    }

    /// Note title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Note body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Note slug.
    pub fn slug(&self) -> &NoteSlug {
        &self.slug
    }
}

/// Persisted note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    id: NoteId,
    author: UserId,
    content: NoteContent,
    created_at: DateTime<Utc>,
}

impl Note {
    /// Create a new note owned by `author`.
    pub fn new(id: NoteId, author: UserId, content: NoteContent, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            author,
            content,
            created_at,
        }
    }

    /// Rebuild a note from stored columns.
    ///
    /// Storage enforces the same invariants as the form validator, so stored
    /// titles and texts are taken as-is.
    pub fn restore(
        id: NoteId,
        author: UserId,
        title: String,
        text: String,
        slug: NoteSlug,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self::new(id, author, NoteContent::new(title, text, slug), created_at)
    }

    /// Return a copy carrying new content; id, author and creation time stay.
    #[must_use]
    pub fn with_content(self, content: NoteContent) -> Self {
        Self { content, ..self }
    }

    /// Storage identifier.
    pub fn id(&self) -> &NoteId {
        &self.id
    }

    /// Author (owner) of the note.
    pub fn author(&self) -> &UserId {
        &self.author
    }

    /// Return `true` when `user` owns this note.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.author == user
    }

    /// Note title.
    pub fn title(&self) -> &str {
        self.content.title()
    }

    /// Note body.
    pub fn text(&self) -> &str {
        self.content.text()
    }

    /// Note slug.
    pub fn slug(&self) -> &NoteSlug {
        self.content.slug()
    }

    /// Editable content.
    pub fn content(&self) -> &NoteContent {
        &self.content
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
