//! # Teslo
//!
//! Credential authentication and role-based access control for an Axum API
//! backed by PostgreSQL.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Admin commands (create-user)
//! ├── middleware/       # Identity guard, role guard, role registry, extractors
//! ├── modules/
//! │   └── auth/         # Register, login, check-status and protected sample routes
//! ├── docs.rs           # OpenAPI document
//! ├── logging.rs        # Subscriber setup and request logging
//! ├── metrics.rs        # Prometheus recorder and counters
//! ├── router.rs         # Top-level router
//! ├── state.rs          # Shared application state
//! └── validator.rs      # Validated JSON extractor
//! ```
//!
//! Shared pieces live in workspace crates:
//!
//! - `teslo-core`: [`AppError`](teslo_core::AppError) and password hashing
//! - `teslo-config`: environment-driven configuration
//! - `teslo-auth`: JWT claims, issuing and verification
//! - `teslo-models`: users, roles and request/response DTOs
//! - `teslo-db`: the `UserStore` trait with Postgres and in-memory stores
//!
//! ## Request pipeline
//!
//! Protected routes run the identity guard, then the role guard, then the
//! handler. Each route's required roles are declared once at startup in a
//! [`RoleRegistry`](middleware::registry::RoleRegistry); a caller passes if it
//! holds any one of them.

pub mod cli;
pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;
