use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use teslo_auth::verify_token;
use teslo_core::AppError;
use teslo_models::{User, UserId};

use crate::metrics::track_guard_rejection;
use crate::state::AppState;

/// The caller resolved by [`identity_guard`], stored in request extensions
/// for the rest of the request.
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity {
    user: User,
}

impl AuthenticatedIdentity {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn user_id(&self) -> UserId {
        self.user.id
    }
}

/// First link of the guard chain.
///
/// Requires `Authorization: Bearer <token>`, validates the token, and loads
/// the subject from the user store. Every failure is the same unauthorized
/// error; the specific reason only goes to the debug log.
pub async fn identity_guard(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = authenticate(&state, req.headers()).await?;
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

pub async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<AuthenticatedIdentity, AppError> {
    let token = bearer_token(headers).ok_or_else(|| reject("missing or malformed bearer token"))?;

    let claims = verify_token(token, &state.jwt_config).map_err(|err| {
        debug!(error = %err.error, "Token verification failed");
        reject("invalid or expired token")
    })?;

    let user_id: UserId = claims
        .sub
        .parse()
        .map_err(|_| reject("token subject is not a user id"))?;

    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| reject("token subject no longer exists"))?;

    if !user.is_active {
        return Err(reject("user is inactive"));
    }

    Ok(AuthenticatedIdentity::new(user))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}

fn reject(reason: &'static str) -> AppError {
    debug!(reason, "Identity guard rejected request");
    track_guard_rejection("identity");
    AppError::unauthorized()
}
