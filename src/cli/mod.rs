//! Administrative commands shared by the `teslo-cli` binary.

use anyhow::anyhow;
use std::collections::BTreeSet;
use validator::ValidateEmail;

use teslo_core::PasswordHasher;
use teslo_db::{StoreError, UserStore};
use teslo_models::auth::validate_password_strength;
use teslo_models::{NewUser, Role, User};

/// Creates an account with an explicit role set, bypassing the public
/// registration defaults. An empty `roles` falls back to the default set.
pub async fn create_user(
    users: &dyn UserStore,
    hasher: &PasswordHasher,
    email: &str,
    full_name: &str,
    password: &str,
    roles: BTreeSet<Role>,
) -> anyhow::Result<User> {
    if !email.validate_email() {
        return Err(anyhow!("{} is not a valid email address", email));
    }
    if full_name.trim().is_empty() {
        return Err(anyhow!("Full name is required"));
    }
    validate_password_strength(password).map_err(|e| anyhow!("{}", e))?;

    let password_hash = hasher.hash(password).map_err(|e| e.error)?;

    let new_user = NewUser::with_roles(
        email.to_string(),
        full_name.to_string(),
        Some(password_hash),
        roles,
    );

    users.insert(new_user).await.map_err(|err| match err {
        StoreError::Conflict { .. } => anyhow!("A user with email {} already exists", email),
        other => anyhow!(other),
    })
}
