//! Note domain service.
//!
//! Implements the note driving ports on top of a [`NoteRepository`]: form
//! cleaning, slug uniqueness, ownership checks and timestamps all happen here
//! so adapters only translate transport concerns.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{NoteRepository, NoteRepositoryError, NotesCommand, NotesQuery};
use crate::domain::{
    Access, AccessPolicy, Error, FieldErrors, FormError, Note, NoteForm, NoteId, NoteSlug,
    Target, UserId, duplicate_slug_message,
};

fn map_repository_error(error: NoteRepositoryError) -> Error {
    match error {
        NoteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("note repository unavailable: {message}"))
        }
        NoteRepositoryError::Query { message } => {
            Error::internal(format!("note repository error: {message}"))
        }
        NoteRepositoryError::DuplicateSlug { slug } => {
            Error::conflict(format!("note slug {slug} already exists"))
        }
    }
}

/// Storage collisions on write are reported like the service's own check.
fn map_write_error(error: NoteRepositoryError, slug: &NoteSlug) -> FormError {
    match error {
        NoteRepositoryError::DuplicateSlug { .. } => duplicate_slug(slug),
        other => FormError::Failed(map_repository_error(other)),
    }
}

fn duplicate_slug(slug: &NoteSlug) -> FormError {
    FormError::Invalid(FieldErrors::single("slug", duplicate_slug_message(slug)))
}

/// Note service implementing [`NotesCommand`] and [`NotesQuery`].
#[derive(Clone)]
pub struct NoteService<R> {
    note_repo: Arc<R>,
    clock: Arc<dyn Clock>,
    policy: AccessPolicy,
}

impl<R> NoteService<R> {
    /// Create a note service backed by `note_repo`.
    pub fn new(note_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            note_repo,
            clock,
            policy: AccessPolicy,
        }
    }
}

impl<R> NoteService<R>
where
    R: NoteRepository,
{
    /// Load the note behind `slug` if `actor` may use it.
    async fn owned_note(&self, actor: &UserId, slug: &str) -> Result<Note, Error> {
        let found = match NoteSlug::new(slug) {
            Ok(parsed) => self
                .note_repo
                .find_by_slug(&parsed)
                .await
                .map_err(map_repository_error)?,
            Err(_) => None,
        };
        self.policy.authorize(actor, slug, found)
    }

    async fn ensure_unique(
        &self,
        slug: &NoteSlug,
        excluding: Option<NoteId>,
    ) -> Result<(), FormError> {
        let taken = self
            .note_repo
            .slug_exists(slug, excluding)
            .await
            .map_err(map_repository_error)?;
        if taken {
            return Err(duplicate_slug(slug));
        }
        Ok(())
    }
}

#[async_trait]
impl<R> NotesCommand for NoteService<R>
where
    R: NoteRepository,
{
    async fn create(&self, author: &UserId, form: &NoteForm) -> Result<Note, FormError> {
        let content = form.clean()?;
        self.ensure_unique(content.slug(), None).await?;

        let note = Note::new(NoteId::random(), *author, content, self.clock.utc());
        self.note_repo
            .insert(&note)
            .await
            .map_err(|err| map_write_error(err, note.slug()))?;

        info!(note_id = %note.id(), author = %author, slug = %note.slug(), "note created");
        Ok(note)
    }

    async fn update(
        &self,
        actor: &UserId,
        slug: &str,
        form: &NoteForm,
    ) -> Result<Note, FormError> {
        let existing = self.owned_note(actor, slug).await?;
        let content = form.clean()?;
        self.ensure_unique(content.slug(), Some(*existing.id())).await?;

        let note = existing.with_content(content);
        let updated = self
            .note_repo
            .update(&note)
            .await
            .map_err(|err| map_write_error(err, note.slug()))?;
        if !updated {
            return Err(Error::not_found(format!("note {slug} not found")).into());
        }

        info!(note_id = %note.id(), slug = %note.slug(), "note updated");
        Ok(note)
    }

    async fn delete(&self, actor: &UserId, slug: &str) -> Result<(), Error> {
        let note = self.owned_note(actor, slug).await?;
        let deleted = self
            .note_repo
            .delete(note.id())
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(Error::not_found(format!("note {slug} not found")));
        }

        info!(note_id = %note.id(), slug = %note.slug(), "note deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> NotesQuery for NoteService<R>
where
    R: NoteRepository,
{
    async fn list(&self, actor: &UserId) -> Result<Vec<Note>, Error> {
        if self.policy.check(actor, Target::OwnNotes) == Access::Denied {
            return Err(Error::not_found("notes not found"));
        }
        self.note_repo
            .list_by_author(actor)
            .await
            .map_err(map_repository_error)
    }

    async fn get(&self, actor: &UserId, slug: &str) -> Result<Note, Error> {
        self.owned_note(actor, slug).await
    }
}

#[cfg(test)]
#[path = "note_service_tests.rs"]
mod tests;
