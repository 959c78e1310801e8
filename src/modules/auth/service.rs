use tokio::task;
use tracing::{info, instrument, warn};

use teslo_auth::create_access_token;
use teslo_config::JwtConfig;
use teslo_core::{AppError, PasswordHasher};
use teslo_db::StoreError;
use teslo_models::{AuthResponse, LoginRequest, NewUser, RegisterRequest, User, UserWithSecret};

use crate::metrics::{track_login, track_registration};
use crate::state::AppState;

pub const EMAIL_TAKEN: &str = "Email already registered";

pub struct AuthService;

impl AuthService {
    /// Creates an account with the default role set and returns it with a
    /// fresh access token.
    #[instrument(skip(state, dto), fields(email = %dto.email))]
    pub async fn register(
        state: &AppState,
        dto: RegisterRequest,
    ) -> Result<AuthResponse, AppError> {
        let RegisterRequest {
            email,
            password,
            full_name,
        } = dto;

        let hasher = state.password_hasher.clone();
        let password_hash = task::spawn_blocking(move || hasher.hash(&password)).await??;

        let user = state
            .users
            .insert(NewUser::registration(email, full_name, password_hash))
            .await
            .map_err(|err| match err {
                StoreError::Conflict { .. } => AppError::conflict(EMAIL_TAKEN.to_string()),
                other => AppError::database(other),
            })?;

        track_registration();
        info!(user_id = %user.id, "User registered");

        let token = Self::issue_token(&user, &state.jwt_config)?;
        Ok(AuthResponse { user, token })
    }

    /// Checks credentials and returns the user with a fresh access token.
    ///
    /// Unknown email, missing password hash, wrong password and inactive
    /// account all fail with the same error, and all of them pay for one
    /// bcrypt verification.
    #[instrument(skip(state, dto), fields(email = %dto.email))]
    pub async fn login(state: &AppState, dto: LoginRequest) -> Result<AuthResponse, AppError> {
        let record = state.users.find_by_email_with_secret(&dto.email).await?;

        let hasher = state.password_hasher.clone();
        let password = dto.password;
        let user =
            task::spawn_blocking(move || check_credentials(&hasher, record, &password)).await?;

        let Some(user) = user.filter(|user| user.is_active) else {
            track_login("failure");
            return Err(AppError::unauthorized());
        };

        track_login("success");
        info!(user_id = %user.id, "User logged in");

        let token = Self::issue_token(&user, &state.jwt_config)?;
        Ok(AuthResponse { user, token })
    }

    /// Re-issues a token for an identity that already passed the guard.
    pub fn check_status(user: User, jwt_config: &JwtConfig) -> Result<AuthResponse, AppError> {
        let token = Self::issue_token(&user, jwt_config)?;
        Ok(AuthResponse { user, token })
    }

    pub fn issue_token(user: &User, jwt_config: &JwtConfig) -> Result<String, AppError> {
        create_access_token(user.id.into_inner(), &user.email, jwt_config)
    }
}

/// Returns the user only when the password matches its stored hash.
fn check_credentials(
    hasher: &PasswordHasher,
    record: Option<UserWithSecret>,
    password: &str,
) -> Option<User> {
    let Some(UserWithSecret {
        user,
        password_hash: Some(hash),
    }) = record
    else {
        hasher.verify_dummy(password);
        return None;
    };

    match hasher.verify(password, &hash) {
        Ok(true) => Some(user),
        Ok(false) => None,
        Err(err) => {
            warn!(user_id = %user.id, error = %err.error, "Stored password hash is unreadable");
            None
        }
    }
}
