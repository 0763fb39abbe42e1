//! Port abstraction for user account storage.

use async_trait::async_trait;

use crate::domain::{UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user account repository adapters.
    pub enum UserAccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user account repository query failed: {message}",
        /// The username is already registered.
        DuplicateUsername { username: String } => "username already exists: {username}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccountRepository: Send + Sync {
    /// Store a new account; usernames are unique.
    async fn insert(&self, account: &UserAccount) -> Result<(), UserAccountRepositoryError>;

    /// Fetch an account by exact username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserAccountRepositoryError>;

    /// Fetch an account by id.
    async fn find_by_id(
        &self,
        id: &UserId,
    ) -> Result<Option<UserAccount>, UserAccountRepositoryError>;
}
