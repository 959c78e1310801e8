//! # Teslo Core
//!
//! Foundational types shared by every Teslo crate:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: bcrypt password hashing and constant-time verification
//!
//! # Example
//!
//! ```ignore
//! use teslo_core::{AppError, PasswordHasher};
//!
//! let hasher = PasswordHasher::new(12)?;
//! let hash = hasher.hash("Secret123")?;
//! assert!(hasher.verify("Secret123", &hash)?);
//!
//! let err = AppError::unauthorized();
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind, ErrorResponse};
pub use password::{PasswordHasher, hash_password_with_cost, verify_password};
