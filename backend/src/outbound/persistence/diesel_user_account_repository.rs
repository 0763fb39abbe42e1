//! PostgreSQL-backed [`UserAccountRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserAccountRepository, UserAccountRepositoryError};
use crate::domain::{PasswordHash, User, UserAccount, UserId, Username};

use super::error_mapping::{ErrorMapping, map_diesel_error};
use super::models::{NewUserAccountRow, UserAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

#[derive(Clone)]
pub struct DieselUserAccountRepository {
    pool: DbPool,
}

impl DieselUserAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserAccountRepositoryError {
    UserAccountRepositoryError::connection(error.into_message())
}

fn map_error(
    error: diesel::result::Error,
    username: Option<&str>,
) -> UserAccountRepositoryError {
    map_diesel_error(
        error,
        ErrorMapping {
            query: UserAccountRepositoryError::query,
            connection: UserAccountRepositoryError::connection,
            unique_violation: |constraint: Option<&str>| match username {
                Some(username) => UserAccountRepositoryError::duplicate_username(username),
                None => UserAccountRepositoryError::query(format!(
                    "unique constraint {} violated",
                    constraint.unwrap_or("<unknown>")
                )),
            },
        },
    )
}

fn row_to_account(row: UserAccountRow) -> Result<UserAccount, UserAccountRepositoryError> {
    let username = Username::new(&row.username).map_err(|err| {
        UserAccountRepositoryError::query(format!("stored username is invalid: {err}"))
    })?;
    let password_hash = PasswordHash::from_phc(row.password_hash)
        .map_err(|err| UserAccountRepositoryError::query(err.to_string()))?;
    Ok(UserAccount::new(
        User::new(UserId::from_uuid(row.id), username),
        password_hash,
    ))
}

#[async_trait]
impl UserAccountRepository for DieselUserAccountRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserAccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserAccountRow {
            id: *account.id().as_uuid(),
            username: account.username().as_ref(),
            password_hash: account.password_hash().as_str(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_error(err, Some(account.username().as_ref())))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserAccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::username.eq(username))
            .select(UserAccountRow::as_select())
            .first::<UserAccountRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_error(err, None))?;
        row.map(row_to_account).transpose()
    }

    async fn find_by_id(
        &self,
        id: &UserId,
    ) -> Result<Option<UserAccount>, UserAccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .find(*id.as_uuid())
            .select(UserAccountRow::as_select())
            .first::<UserAccountRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_error(err, None))?;
        row.map(row_to_account).transpose()
    }
}
