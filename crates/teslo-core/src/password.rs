//! Password hashing and verification using bcrypt.
//!
//! bcrypt embeds the salt and cost factor in the hash string, and its
//! verification compares digests in constant time. Input longer than
//! [`MAX_PASSWORD_BYTES`] is refused rather than silently truncated.

use bcrypt::{hash, verify};
use teslo_config::MAX_PASSWORD_BYTES;

use crate::errors::AppError;

/// Hashes and verifies passwords at a fixed bcrypt cost.
///
/// The hasher also keeps a dummy hash computed at the same cost, used by
/// [`PasswordHasher::verify_dummy`] so that a login for an unknown account
/// takes as long as one with a wrong password.
#[derive(Clone, Debug)]
pub struct PasswordHasher {
    cost: u32,
    dummy_hash: String,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self, AppError> {
        let dummy_hash = hash("teslo-dummy-password", cost).map_err(|e| {
            AppError::internal_error(format!("Failed to initialise password hasher: {}", e))
        })?;

        Ok(Self { cost, dummy_hash })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        hash_password_with_cost(password, self.cost)
    }

    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        verify_password(password, hash)
    }

    /// Burns one verification against the dummy hash. Always returns `false`.
    pub fn verify_dummy(&self, password: &str) -> bool {
        let _ = verify(password, &self.dummy_hash);
        false
    }
}

pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::unprocessable(anyhow::anyhow!(
            "password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        )));
    }

    hash(password, cost)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

/// A password longer than [`MAX_PASSWORD_BYTES`] never matches, since no
/// stored hash could have been produced from it.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Ok(false);
    }

    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}
