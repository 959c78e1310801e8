//! # Teslo Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`cors`]: allowed CORS origins
//! - [`password`]: bcrypt work factor
//! - [`server`]: bind address, log directory and metrics toggle
//!
//! # Example
//!
//! ```ignore
//! use teslo_config::{CorsConfig, JwtConfig, PasswordConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod password;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use password::{DEFAULT_BCRYPT_COST, MAX_PASSWORD_BYTES, MIN_BCRYPT_COST, PasswordConfig};
pub use server::ServerConfig;
