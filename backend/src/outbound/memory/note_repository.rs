//! In-memory [`NoteRepository`].

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{NoteRepository, NoteRepositoryError};
use crate::domain::{Note, NoteId, NoteSlug, UserId};

use super::lock;

/// Notes kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryNoteRepository {
    notes: Mutex<Vec<Note>>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn notes(&self) -> Result<std::sync::MutexGuard<'_, Vec<Note>>, NoteRepositoryError> {
        lock(&self.notes, NoteRepositoryError::query)
    }
}

fn slug_taken(notes: &[Note], slug: &NoteSlug, excluding: Option<NoteId>) -> bool {
    notes
        .iter()
        .any(|note| note.slug() == slug && Some(*note.id()) != excluding)
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn insert(&self, note: &Note) -> Result<(), NoteRepositoryError> {
        let mut notes = self.notes()?;
        if slug_taken(&notes, note.slug(), None) {
            return Err(NoteRepositoryError::duplicate_slug(note.slug().as_str()));
        }
        if notes.iter().any(|existing| existing.id() == note.id()) {
            return Err(NoteRepositoryError::query(format!(
                "note {} already stored",
                note.id()
            )));
        }
        notes.push(note.clone());
        Ok(())
    }

    async fn update(&self, note: &Note) -> Result<bool, NoteRepositoryError> {
        let mut notes = self.notes()?;
        if slug_taken(&notes, note.slug(), Some(*note.id())) {
            return Err(NoteRepositoryError::duplicate_slug(note.slug().as_str()));
        }
        match notes.iter_mut().find(|existing| existing.id() == note.id()) {
            Some(existing) => {
                *existing = note.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &NoteId) -> Result<bool, NoteRepositoryError> {
        let mut notes = self.notes()?;
        let before = notes.len();
        notes.retain(|note| note.id() != id);
        Ok(notes.len() != before)
    }

    async fn find_by_slug(&self, slug: &NoteSlug) -> Result<Option<Note>, NoteRepositoryError> {
        Ok(self
            .notes()?
            .iter()
            .find(|note| note.slug() == slug)
            .cloned())
    }

    async fn slug_exists(
        &self,
        slug: &NoteSlug,
        excluding: Option<NoteId>,
    ) -> Result<bool, NoteRepositoryError> {
        Ok(slug_taken(&self.notes()?, slug, excluding))
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NoteRepositoryError> {
        Ok(self
            .notes()?
            .iter()
            .filter(|note| note.is_owned_by(author))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, NoteRepositoryError> {
        Ok(self.notes()?.len() as u64)
    }
}
