//! Driving port for resolving session identities into users.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for looking users up.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return the user with `id`, or `None` when the account no longer exists.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error>;
}
