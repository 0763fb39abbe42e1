//! Process-local adapters used when no database is configured and in tests.
//!
//! Each repository keeps its rows behind one mutex so the uniqueness checks
//! and the write happen atomically, matching the database constraints.

mod note_repository;
mod user_account_repository;

pub use note_repository::InMemoryNoteRepository;
pub use user_account_repository::InMemoryUserAccountRepository;

use std::sync::{Mutex, MutexGuard};

/// Lock `mutex`, reporting poisoning through `query`.
fn lock<'a, T, E>(
    mutex: &'a Mutex<T>,
    query: impl FnOnce(String) -> E,
) -> Result<MutexGuard<'a, T>, E> {
    mutex
        .lock()
        .map_err(|err| query(format!("in-memory store poisoned: {err}")))
}
