//! Stored user account: identity plus credential hash.

use super::{PasswordHash, User, UserId, Username};

/// User identity together with the hash used to authenticate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    user: User,
    password_hash: PasswordHash,
}

impl UserAccount {
    /// Pair a user with its password hash.
    pub fn new(user: User, password_hash: PasswordHash) -> Self {
        Self {
            user,
            password_hash,
        }
    }

    /// Identity part of the account.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Shortcut for the account's user id.
    pub fn id(&self) -> &UserId {
        self.user.id()
    }

    /// Shortcut for the account's login name.
    pub fn username(&self) -> &Username {
        self.user.username()
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}
