//! Driving port for note mutations.
//!
//! Inbound adapters hand raw form submissions to this port. Validation
//! failures come back as [`FormError::Invalid`] so the adapter can re-render
//! the form; everything else is a domain [`crate::domain::Error`].

use async_trait::async_trait;

use crate::domain::{Error, FormError, Note, NoteForm, UserId};

/// Domain use-case port for creating, editing and deleting notes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesCommand: Send + Sync {
    /// Validate `form` and store a new note owned by `author`.
    async fn create(&self, author: &UserId, form: &NoteForm) -> Result<Note, FormError>;

    /// Validate `form` and apply it to the actor's note identified by `slug`.
    async fn update(
        &self,
        actor: &UserId,
        slug: &str,
        form: &NoteForm,
    ) -> Result<Note, FormError>;

    /// Delete the actor's note identified by `slug`.
    async fn delete(&self, actor: &UserId, slug: &str) -> Result<(), Error>;
}
