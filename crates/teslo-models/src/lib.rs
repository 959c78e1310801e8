//! # Teslo Models
//!
//! Domain models and DTOs for the Teslo auth service.
//!
//! - [`ids`]: the [`UserId`] newtype
//! - [`roles`]: the closed [`Role`] enumeration
//! - [`users`]: [`User`], [`NewUser`] and [`UserWithSecret`]
//! - [`auth`]: register/login requests and the token-bearing response

pub mod auth;
pub mod ids;
pub mod roles;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{AuthResponse, LoginRequest, RegisterRequest};
pub use ids::UserId;
pub use roles::{Role, UnknownRole};
pub use users::{NewUser, User, UserWithSecret};
