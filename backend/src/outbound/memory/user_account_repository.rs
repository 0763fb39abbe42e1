//! In-memory [`UserAccountRepository`].

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserAccountRepository, UserAccountRepositoryError};
use crate::domain::{UserAccount, UserId};

use super::lock;

/// Accounts keyed by nothing in particular; lookups scan.
#[derive(Debug, Default)]
pub struct InMemoryUserAccountRepository {
    accounts: Mutex<Vec<UserAccount>>,
}

impl InMemoryUserAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn find(
        &self,
        matches: impl Fn(&UserAccount) -> bool,
    ) -> Result<Option<UserAccount>, UserAccountRepositoryError> {
        let accounts = lock(&self.accounts, UserAccountRepositoryError::query)?;
        Ok(accounts.iter().find(|account| matches(account)).cloned())
    }
}

#[async_trait]
impl UserAccountRepository for InMemoryUserAccountRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserAccountRepositoryError> {
        let mut accounts = lock(&self.accounts, UserAccountRepositoryError::query)?;
        if accounts
            .iter()
            .any(|existing| existing.username() == account.username())
        {
            return Err(UserAccountRepositoryError::duplicate_username(
                account.username().as_ref(),
            ));
        }
        accounts.push(account.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserAccountRepositoryError> {
        self.find(|account| account.username().as_ref() == username)
    }

    async fn find_by_id(
        &self,
        id: &UserId,
    ) -> Result<Option<UserAccount>, UserAccountRepositoryError> {
        self.find(|account| account.id() == id)
    }
}
