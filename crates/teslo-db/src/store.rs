//! The user store boundary.
//!
//! Handlers and guards only see [`UserStore`]. Uniqueness of the email is
//! the store's job: `insert` must report a duplicate as
//! [`StoreError::Conflict`] atomically, without a separate lookup by the
//! caller.

use async_trait::async_trait;
use thiserror::Error;

use teslo_models::{NewUser, User, UserId, UserWithSecret};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a user with this {field} already exists")]
    Conflict { field: &'static str },

    #[error("stored user record is invalid: {0}")]
    InvalidRecord(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks up a user by exact email. The password hash is never loaded.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Looks up a user by exact email, including the password hash.
    async fn find_by_email_with_secret(
        &self,
        email: &str,
    ) -> Result<Option<UserWithSecret>, StoreError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Inserts a user, failing with [`StoreError::Conflict`] if the email is taken.
    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError>;
}
