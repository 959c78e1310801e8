//! PostgreSQL-backed [`UserStore`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::collections::BTreeSet;
use tracing::instrument;
use uuid::Uuid;

use teslo_models::{NewUser, Role, User, UserId, UserWithSecret};

use crate::store::{StoreError, UserStore};

const USER_COLUMNS: &str = "id, email, full_name, is_active, roles, created_at";

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    full_name: String,
    is_active: bool,
    roles: Vec<String>,
    created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct UserSecretRow {
    #[sqlx(flatten)]
    user: UserRow,
    password: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let roles: BTreeSet<Role> = row
            .roles
            .iter()
            .map(|r| r.parse::<Role>())
            .collect::<Result<_, _>>()
            .map_err(|e| StoreError::InvalidRecord(format!("user {}: {}", row.id, e)))?;

        Ok(User {
            id: UserId::from_uuid(row.id),
            email: row.email,
            full_name: row.full_name,
            is_active: row.is_active,
            roles,
            created_at: row.created_at,
        })
    }
}

#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_insert_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::Conflict { field: "email" };
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .map(User::try_from)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_email_with_secret(
        &self,
        email: &str,
    ) -> Result<Option<UserWithSecret>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS}, password FROM users WHERE email = $1");
        let Some(row) = sqlx::query_as::<_, UserSecretRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        Ok(Some(UserWithSecret {
            user: User::try_from(row.user)?,
            password_hash: row.password,
        }))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await?
            .map(User::try_from)
            .transpose()
    }

    #[instrument(skip(self, new_user), fields(email = %new_user.email))]
    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let roles: Vec<String> = new_user.roles.iter().map(|r| r.as_str().to_string()).collect();
        let sql = format!(
            "INSERT INTO users (email, full_name, password, roles) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(&new_user.email)
            .bind(&new_user.full_name)
            .bind(&new_user.password_hash)
            .bind(&roles)
            .fetch_one(&self.pool)
            .await
            .map_err(map_insert_error)?;

        User::try_from(row)
    }
}
