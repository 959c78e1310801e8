//! # Teslo Auth
//!
//! Access token support for the Teslo auth service:
//!
//! - [`claims`]: the JWT claim structure
//! - [`jwt`]: token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use teslo_auth::{create_access_token, verify_token};
//! use teslo_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "user@example.com", &config)?;
//! let claims = verify_token(&token, &config)?;
//! println!("User ID: {}", claims.sub);
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, encode_claims, verify_token};
