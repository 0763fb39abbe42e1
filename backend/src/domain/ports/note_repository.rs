//! Port abstraction for note storage adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Note, NoteId, NoteSlug, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by note repository adapters.
    pub enum NoteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "note repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "note repository query failed: {message}",
        /// Another note already uses the slug.
        DuplicateSlug { slug: String } => "note slug already exists: {slug}",
    }
}

/// Storage for notes.
///
/// Adapters must enforce slug uniqueness atomically and report a collision as
/// [`NoteRepositoryError::DuplicateSlug`], whatever check the caller did
/// beforehand.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Persist a new note.
    async fn insert(&self, note: &Note) -> Result<(), NoteRepositoryError>;

    /// Replace the stored content of an existing note, matched by id.
    ///
    /// Returns `false` when no note has that id.
    async fn update(&self, note: &Note) -> Result<bool, NoteRepositoryError>;

    /// Remove a note. Returns `false` when no note has that id.
    async fn delete(&self, id: &NoteId) -> Result<bool, NoteRepositoryError>;

    /// Fetch a note by slug, whoever owns it.
    async fn find_by_slug(&self, slug: &NoteSlug) -> Result<Option<Note>, NoteRepositoryError>;

    /// Return `true` when a note other than `excluding` uses `slug`.
    async fn slug_exists(
        &self,
        slug: &NoteSlug,
        excluding: Option<NoteId>,
    ) -> Result<bool, NoteRepositoryError>;

    /// Every note owned by `author`, oldest first.
    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NoteRepositoryError>;

    /// Total number of stored notes.
    async fn count(&self) -> Result<u64, NoteRepositoryError>;
}
