//! # Teslo DB
//!
//! Persistence for user records.
//!
//! - [`store`]: the [`UserStore`] trait and [`StoreError`]
//! - [`postgres`]: [`PgUserStore`], backed by SQLx and PostgreSQL
//! - [`memory`]: [`MemoryUserStore`], an in-process store for tests and local runs
//!
//! # Example
//!
//! ```ignore
//! use teslo_db::{PgUserStore, init_db_pool};
//!
//! let pool = init_db_pool(&database_url).await?;
//! let store = PgUserStore::new(pool);
//! ```

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;
pub use store::{StoreError, UserStore};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Connects a PostgreSQL pool.
///
/// The returned pool is cheaply cloneable and should be created once at
/// startup.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}
