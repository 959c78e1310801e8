use std::env;

/// bcrypt work factor used when hashing new passwords.
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// Lowest work factor bcrypt accepts. Only suitable for tests.
pub const MIN_BCRYPT_COST: u32 = 4;
/// Highest work factor bcrypt accepts.
pub const MAX_BCRYPT_COST: u32 = 31;

/// bcrypt ignores every byte of input past this length.
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Clone, Debug)]
pub struct PasswordConfig {
    pub bcrypt_cost: u32,
}

impl PasswordConfig {
    pub fn from_env() -> Self {
        let bcrypt_cost = env::var("BCRYPT_COST")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|cost| (MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(cost))
            .unwrap_or(DEFAULT_BCRYPT_COST);

        Self { bcrypt_cost }
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}
