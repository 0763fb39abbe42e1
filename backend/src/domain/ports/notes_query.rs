//! Driving port for note reads.

use async_trait::async_trait;

use crate::domain::{Error, Note, UserId};

/// Domain use-case port for reading notes on behalf of a user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesQuery: Send + Sync {
    /// Every note owned by `actor`, oldest first.
    async fn list(&self, actor: &UserId) -> Result<Vec<Note>, Error>;

    /// The actor's note identified by `slug`.
    ///
    /// A foreign note fails exactly like a missing one.
    async fn get(&self, actor: &UserId, slug: &str) -> Result<Note, Error>;
}
