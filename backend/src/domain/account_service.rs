//! Account domain service: signup, login and session identity lookups.
//!
//! Argon2 hashing is CPU bound, so hashing and verification run on the
//! blocking thread pool.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task;
use tracing::{info, warn};

use crate::domain::ports::{
    LoginService, SignupService, UserAccountRepository, UserAccountRepositoryError, UsersQuery,
};
use crate::domain::{
    Error, FieldErrors, FormError, LoginCredentials, PasswordHash, Registration, User,
    UserAccount, UserId,
};

/// Message attached to `username` when signup picks a taken name.
pub const USERNAME_TAKEN: &str = "A user with that username already exists.";

fn map_repository_error(error: UserAccountRepositoryError) -> Error {
    match error {
        UserAccountRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("account repository unavailable: {message}"))
        }
        UserAccountRepositoryError::Query { message } => {
            Error::internal(format!("account repository error: {message}"))
        }
        UserAccountRepositoryError::DuplicateUsername { username } => {
            Error::conflict(format!("username {username} already exists"))
        }
    }
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

/// Account service implementing [`LoginService`], [`SignupService`] and
/// [`UsersQuery`].
#[derive(Clone)]
pub struct AccountService<R> {
    account_repo: Arc<R>,
}

impl<R> AccountService<R> {
    /// Create an account service backed by `account_repo`.
    pub fn new(account_repo: Arc<R>) -> Self {
        Self { account_repo }
    }
}

#[async_trait]
impl<R> LoginService for AccountService<R>
where
    R: UserAccountRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let Some(account) = self
            .account_repo
            .find_by_username(credentials.username())
            .await
            .map_err(map_repository_error)?
        else {
            warn!(username = credentials.username(), "login for unknown user");
            return Err(invalid_credentials());
        };

        let hash = account.password_hash().clone();
        let password = credentials.password().to_owned();
        let verified = task::spawn_blocking(move || hash.verify(&password))
            .await
            .map_err(|err| Error::internal(format!("password verification aborted: {err}")))?;
        if !verified {
            warn!(user_id = %account.id(), "login with wrong password");
            return Err(invalid_credentials());
        }

        info!(user_id = %account.id(), "user logged in");
        Ok(*account.id())
    }
}

#[async_trait]
impl<R> SignupService for AccountService<R>
where
    R: UserAccountRepository,
{
    async fn register(&self, registration: &Registration) -> Result<User, FormError> {
        let password = registration.password().to_owned();
        let password_hash = task::spawn_blocking(move || PasswordHash::hash(&password))
            .await
            .map_err(|err| Error::internal(format!("password hashing aborted: {err}")))?
            .map_err(|err| Error::internal(err.to_string()))?;

        let user = User::new(UserId::random(), registration.username().clone());
        let account = UserAccount::new(user.clone(), password_hash);
        match self.account_repo.insert(&account).await {
            Ok(()) => {}
            Err(UserAccountRepositoryError::DuplicateUsername { .. }) => {
                return Err(FieldErrors::single("username", USERNAME_TAKEN).into());
            }
            Err(other) => return Err(map_repository_error(other).into()),
        }

        info!(user_id = %user.id(), username = %user.username(), "user registered");
        Ok(user)
    }
}

#[async_trait]
impl<R> UsersQuery for AccountService<R>
where
    R: UserAccountRepository,
{
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.account_repo
            .find_by_id(id)
            .await
            .map(|account| account.map(|account| account.user().clone()))
            .map_err(map_repository_error)
    }
}
