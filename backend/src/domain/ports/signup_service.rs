//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{FormError, Registration, User};

/// Domain use-case port for signing up.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Create an account; a taken username is a field error on `username`.
    async fn register(&self, registration: &Registration) -> Result<User, FormError>;
}
