//! User domain models.
//!
//! [`User`] is the outward-facing record and has no password field at all,
//! so it cannot leak a hash through serialization. The hash only travels in
//! [`UserWithSecret`], which is returned by the store when a caller asks for
//! it explicitly and is never serialized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use utoipa::ToSchema;

use crate::ids::UserId;
use crate::roles::Role;

/// A user account as seen by handlers and API responses.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: UserId,
    /// Login identifier, unique and compared exactly as stored.
    #[schema(example = "user@example.com")]
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    #[schema(value_type = Vec<Role>)]
    pub roles: BTreeSet<Role>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Any-of check: true when at least one of `required` is held.
    pub fn has_any_role(&self, required: &BTreeSet<Role>) -> bool {
        !self.roles.is_disjoint(required)
    }
}

/// A user together with its stored password hash.
///
/// `password_hash` is `None` for accounts that were never given a password.
#[derive(Clone)]
pub struct UserWithSecret {
    pub user: User,
    pub password_hash: Option<String>,
}

impl fmt::Debug for UserWithSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserWithSecret")
            .field("user", &self.user)
            .field("password_hash", &self.password_hash.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Data needed to insert a user.
#[derive(Clone)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    pub password_hash: Option<String>,
    pub roles: BTreeSet<Role>,
}

impl NewUser {
    /// A self-registered account with the default role set.
    pub fn registration(email: String, full_name: String, password_hash: String) -> Self {
        Self::with_roles(email, full_name, Some(password_hash), Role::default_set())
    }

    /// An account with explicit roles. An empty set falls back to the default.
    pub fn with_roles(
        email: String,
        full_name: String,
        password_hash: Option<String>,
        roles: BTreeSet<Role>,
    ) -> Self {
        let roles = if roles.is_empty() {
            Role::default_set()
        } else {
            roles
        };

        Self {
            email,
            full_name,
            password_hash,
            roles,
        }
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("password_hash", &self.password_hash.as_ref().map(|_| "<redacted>"))
            .field("roles", &self.roles)
            .finish()
    }
}
