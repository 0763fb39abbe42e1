//! PostgreSQL-backed [`NoteRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{NoteRepository, NoteRepositoryError};
use crate::domain::{Note, NoteId, NoteSlug, UserId};

use super::error_mapping::{ErrorMapping, map_diesel_error};
use super::models::{NewNoteRow, NoteRow, NoteUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::notes;

/// Unique index on `notes.slug`, named in the initial migration.
const SLUG_CONSTRAINT: &str = "notes_slug_key";

#[derive(Clone)]
pub struct DieselNoteRepository {
    pool: DbPool,
}

impl DieselNoteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> NoteRepositoryError {
    NoteRepositoryError::connection(error.into_message())
}

/// Map Diesel failures; `slug` is the value being written, if any.
fn map_write_error(error: diesel::result::Error, slug: Option<&NoteSlug>) -> NoteRepositoryError {
    map_diesel_error(
        error,
        ErrorMapping {
            query: NoteRepositoryError::query,
            connection: NoteRepositoryError::connection,
            unique_violation: |constraint: Option<&str>| match (constraint, slug) {
                (Some(SLUG_CONSTRAINT) | None, Some(slug)) => {
                    NoteRepositoryError::duplicate_slug(slug.as_str())
                }
                (name, _) => NoteRepositoryError::query(format!(
                    "unique constraint {} violated",
                    name.unwrap_or("<unknown>")
                )),
            },
        },
    )
}

fn map_read_error(error: diesel::result::Error) -> NoteRepositoryError {
    map_write_error(error, None)
}

fn row_to_note(row: NoteRow) -> Result<Note, NoteRepositoryError> {
    let NoteRow {
        id,
        title,
        text,
        slug,
        author_id,
        created_at,
    } = row;
    let slug = NoteSlug::new(slug)
        .map_err(|err| NoteRepositoryError::query(format!("stored slug is invalid: {err}")))?;
    Ok(Note::restore(
        NoteId::from_uuid(id),
        UserId::from_uuid(author_id),
        title,
        text,
        slug,
        created_at,
    ))
}

#[async_trait]
impl NoteRepository for DieselNoteRepository {
    async fn insert(&self, note: &Note) -> Result<(), NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewNoteRow {
            id: *note.id().as_uuid(),
            title: note.title(),
            text: note.text(),
            slug: note.slug().as_str(),
            author_id: *note.author().as_uuid(),
            created_at: note.created_at(),
        };
        diesel::insert_into(notes::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_write_error(err, Some(note.slug())))
    }

    async fn update(&self, note: &Note) -> Result<bool, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = NoteUpdate {
            title: note.title(),
            text: note.text(),
            slug: note.slug().as_str(),
        };
        let updated = diesel::update(notes::table.find(*note.id().as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, Some(note.slug())))?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &NoteId) -> Result<bool, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(notes::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_read_error)?;
        Ok(deleted > 0)
    }

    async fn find_by_slug(&self, slug: &NoteSlug) -> Result<Option<Note>, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = notes::table
            .filter(notes::slug.eq(slug.as_str()))
            .select(NoteRow::as_select())
            .first::<NoteRow>(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;
        row.map(row_to_note).transpose()
    }

    async fn slug_exists(
        &self,
        slug: &NoteSlug,
        excluding: Option<NoteId>,
    ) -> Result<bool, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = notes::table
            .select(notes::id)
            .filter(notes::slug.eq(slug.as_str()))
            .into_boxed();
        if let Some(id) = excluding {
            query = query.filter(notes::id.ne(*id.as_uuid()));
        }
        let found = query
            .first::<Uuid>(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;
        Ok(found.is_some())
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<NoteRow> = notes::table
            .filter(notes::author_id.eq(author.as_uuid()))
            .order((notes::created_at.asc(), notes::id.asc()))
            .select(NoteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;
        rows.into_iter().map(row_to_note).collect()
    }

    async fn count(&self) -> Result<u64, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = notes::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_read_error)?;
        u64::try_from(total).map_err(|err| NoteRepositoryError::query(err.to_string()))
    }
}
