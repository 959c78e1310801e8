use anyhow::Context;
use std::fmt;
use std::sync::Arc;

use teslo_config::{CorsConfig, JwtConfig, PasswordConfig};
use teslo_core::PasswordHasher;
use teslo_db::{PgUserStore, UserStore, init_db_pool};

use crate::middleware::registry::RoleRegistry;
use crate::modules::role_registry;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub password_hasher: PasswordHasher,
    pub role_registry: Arc<RoleRegistry>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
        password_hasher: PasswordHasher,
        role_registry: RoleRegistry,
    ) -> Self {
        Self {
            users,
            jwt_config,
            cors_config,
            password_hasher,
            role_registry: Arc::new(role_registry),
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("cors_config", &self.cors_config)
            .field("bcrypt_cost", &self.password_hasher.cost())
            .field("role_registry", &self.role_registry)
            .finish_non_exhaustive()
    }
}

/// Connects to PostgreSQL, applies pending migrations and builds the state.
///
/// Fails if the role registry declarations are inconsistent.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let password_config = PasswordConfig::from_env();
    let password_hasher = PasswordHasher::new(password_config.bcrypt_cost)
        .map_err(|e| e.error)
        .context("Failed to initialise password hasher")?;

    let registry = role_registry().context("Invalid role requirements")?;

    Ok(AppState::new(
        Arc::new(PgUserStore::new(pool)),
        JwtConfig::from_env(),
        CorsConfig::from_env(),
        password_hasher,
        registry,
    ))
}
