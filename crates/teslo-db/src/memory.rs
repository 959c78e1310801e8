//! In-process [`UserStore`] used by tests and local development.
//!
//! The email index and the user map are updated under one write lock, so a
//! duplicate insert can never slip between the check and the write.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use teslo_models::{NewUser, User, UserId, UserWithSecret};

use crate::store::{StoreError, UserStore};

#[derive(Default)]
struct MemoryState {
    users: HashMap<UserId, UserWithSecret>,
    by_email: HashMap<String, UserId>,
}

#[derive(Default)]
pub struct MemoryUserStore {
    state: RwLock<MemoryState>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Flips the active flag. Returns `false` if the user does not exist.
    pub async fn set_active(&self, id: UserId, active: bool) -> bool {
        let mut state = self.state.write().await;
        match state.users.get_mut(&id) {
            Some(record) => {
                record.user.is_active = active;
                true
            }
            None => false,
        }
    }

    /// Deletes a user. Returns `false` if the user does not exist.
    pub async fn remove(&self, id: UserId) -> bool {
        let mut state = self.state.write().await;
        match state.users.remove(&id) {
            Some(record) => {
                state.by_email.remove(&record.user.email);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .find_by_email_with_secret(email)
            .await?
            .map(|record| record.user))
    }

    async fn find_by_email_with_secret(
        &self,
        email: &str,
    ) -> Result<Option<UserWithSecret>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .by_email
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state.users.get(&id).map(|record| record.user.clone()))
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut state = self.state.write().await;

        if state.by_email.contains_key(&new_user.email) {
            return Err(StoreError::Conflict { field: "email" });
        }

        let user = User {
            id: UserId::new(),
            email: new_user.email,
            full_name: new_user.full_name,
            is_active: true,
            roles: new_user.roles,
            created_at: Utc::now(),
        };

        state.by_email.insert(user.email.clone(), user.id);
        state.users.insert(
            user.id,
            UserWithSecret {
                user: user.clone(),
                password_hash: new_user.password_hash,
            },
        );

        Ok(user)
    }
}
