use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use teslo_core::{AppError, ErrorResponse};
use teslo_models::{AuthResponse, LoginRequest, RegisterRequest, User};

use crate::middleware::extractors::{CurrentUser, CurrentUserEmail, RawHeaders};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::AuthService;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PrivateResponse {
    pub ok: bool,
    pub user: User,
    pub email: String,
    /// Request headers as `[name, value, name, value, ...]`.
    pub raw_headers: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoleRouteResponse {
    pub ok: bool,
    pub user: User,
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let response = AuthService::register(&state, dto).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = AuthService::login(&state, dto).await?;
    Ok(Json(response))
}

/// Re-issue a token for the current identity
#[utoipa::path(
    get,
    path = "/api/auth/check-status",
    responses(
        (status = 200, description = "Fresh token for the current user", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn check_auth_status(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<AuthResponse>, AppError> {
    let response = AuthService::check_status(user, &state.jwt_config)?;
    Ok(Json(response))
}

/// Echo the authenticated identity
#[utoipa::path(
    get,
    path = "/api/auth/private",
    responses(
        (status = 200, description = "Authenticated identity", body = PrivateResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
pub async fn private_route(
    CurrentUser(user): CurrentUser,
    CurrentUserEmail(email): CurrentUserEmail,
    RawHeaders(raw_headers): RawHeaders,
) -> Json<PrivateResponse> {
    Json(PrivateResponse {
        ok: true,
        user,
        email,
        raw_headers,
    })
}

/// Admin-only route
#[utoipa::path(
    get,
    path = "/api/auth/private/admin",
    responses(
        (status = 200, description = "Caller holds the admin role", body = RoleRouteResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
pub async fn admin_route(CurrentUser(user): CurrentUser) -> Json<RoleRouteResponse> {
    Json(RoleRouteResponse { ok: true, user })
}

/// Route for admins and super users
#[utoipa::path(
    get,
    path = "/api/auth/private/super",
    responses(
        (status = 200, description = "Caller holds admin or super-user", body = RoleRouteResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
pub async fn super_route(CurrentUser(user): CurrentUser) -> Json<RoleRouteResponse> {
    Json(RoleRouteResponse { ok: true, user })
}
