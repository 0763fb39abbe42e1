//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, NotesCommand, NotesQuery, SignupService, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub notes: Arc<dyn NotesCommand>,
    pub notes_query: Arc<dyn NotesQuery>,
    pub login: Arc<dyn LoginService>,
    pub signup: Arc<dyn SignupService>,
    pub users: Arc<dyn UsersQuery>,
}

impl HttpState {
    /// Build state from one notes service and one accounts service, each
    /// implementing every port of its area.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use notes_backend::domain::{AccountService, NoteService};
    /// use notes_backend::inbound::http::state::HttpState;
    /// use notes_backend::outbound::memory::{
    ///     InMemoryNoteRepository, InMemoryUserAccountRepository,
    /// };
    ///
    /// let notes = NoteService::new(
    ///     Arc::new(InMemoryNoteRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let accounts = AccountService::new(Arc::new(InMemoryUserAccountRepository::default()));
    /// let _state = HttpState::from_services(Arc::new(notes), Arc::new(accounts));
    /// ```
    pub fn from_services<N, A>(notes: Arc<N>, accounts: Arc<A>) -> Self
    where
        N: NotesCommand + NotesQuery + 'static,
        A: LoginService + SignupService + UsersQuery + 'static,
    {
        Self {
            notes: notes.clone(),
            notes_query: notes,
            login: accounts.clone(),
            signup: accounts.clone(),
            users: accounts,
        }
    }
}
