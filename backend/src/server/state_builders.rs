//! Builders for HTTP state over the configured storage.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use notes_backend::domain::ports::{NoteRepository, UserAccountRepository};
use notes_backend::domain::{AccountService, NoteService};
use notes_backend::inbound::http::state::HttpState;
use notes_backend::outbound::memory::{InMemoryNoteRepository, InMemoryUserAccountRepository};
use notes_backend::outbound::persistence::{DieselNoteRepository, DieselUserAccountRepository};

use super::ServerConfig;

/// Wire the note and account services over one pair of repositories.
fn state_over<N, U>(notes: N, accounts: U) -> HttpState
where
    N: NoteRepository + 'static,
    U: UserAccountRepository + 'static,
{
    let notes = NoteService::new(Arc::new(notes), Arc::new(DefaultClock));
    let accounts = AccountService::new(Arc::new(accounts));
    HttpState::from_services(Arc::new(notes), Arc::new(accounts))
}

/// Build the handler state: PostgreSQL when a pool is configured, otherwise
/// process memory.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => state_over(
            DieselNoteRepository::new(pool.clone()),
            DieselUserAccountRepository::new(pool.clone()),
        ),
        None => {
            warn!("no database configured; notes and accounts are kept in memory");
            state_over(
                InMemoryNoteRepository::new(),
                InMemoryUserAccountRepository::new(),
            )
        }
    };
    web::Data::new(state)
}
