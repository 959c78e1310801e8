//! Application error type shared by every layer of the service.
//!
//! Errors carry an HTTP status and an [`anyhow::Error`] with the detailed
//! cause. The status decides the [`ErrorKind`] and what the caller gets to
//! see: authentication failures always render one fixed message, and
//! internal failures are logged in full and masked in the response.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

/// Message returned for every authentication failure, whatever the cause.
pub const AUTHENTICATION_FAILED: &str = "Invalid credentials";

/// Message returned when a valid identity lacks the required role.
pub const INSUFFICIENT_ROLE: &str = "Insufficient role";

/// Message returned in place of any internal error detail.
pub const INTERNAL_ERROR: &str = "Internal server error";

/// The category of an [`AppError`], independent of its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Conflict,
    Authentication,
    Authorization,
    Internal,
}

/// JSON error body, documented for the OpenAPI schema.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::internal(anyhow::anyhow!(message))
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn conflict(message: String) -> Self {
        Self::new(StatusCode::CONFLICT, anyhow::anyhow!(message))
    }

    /// Authentication failure. The message is fixed so that callers cannot
    /// tell an unknown account from a wrong password or a bad token.
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(AUTHENTICATION_FAILED))
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(INSUFFICIENT_ROLE))
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn kind(&self) -> ErrorKind {
        match self.status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ErrorKind::Validation,
            StatusCode::CONFLICT => ErrorKind::Conflict,
            StatusCode::UNAUTHORIZED => ErrorKind::Authentication,
            StatusCode::FORBIDDEN => ErrorKind::Authorization,
            _ => ErrorKind::Internal,
        }
    }

    /// The message a caller is allowed to see.
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::Authentication => AUTHENTICATION_FAILED.to_string(),
            ErrorKind::Internal => INTERNAL_ERROR.to_string(),
            _ => self.error.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.kind() == ErrorKind::Internal {
            tracing::error!(status = %self.status, error = ?self.error, "Internal error");
        }

        let body = Json(json!({
            "error": self.public_message()
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_kind_follows_status() {
        assert_eq!(AppError::bad_request(anyhow::anyhow!("x")).kind(), ErrorKind::Validation);
        assert_eq!(AppError::unprocessable(anyhow::anyhow!("x")).kind(), ErrorKind::Validation);
        assert_eq!(AppError::conflict("x".into()).kind(), ErrorKind::Conflict);
        assert_eq!(AppError::unauthorized().kind(), ErrorKind::Authentication);
        assert_eq!(AppError::forbidden().kind(), ErrorKind::Authorization);
        assert_eq!(AppError::internal_error("x".into()).kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_unknown_errors_convert_to_internal() {
        let io = std::io::Error::other("disk on fire");
        let err: AppError = io.into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_internal_detail_is_masked() {
        let (status, body) =
            body_json(AppError::internal_error("connection refused to 10.0.0.3".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], INTERNAL_ERROR);
    }

    #[tokio::test]
    async fn test_authentication_message_is_uniform() {
        let custom = AppError::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!("token expired"));
        let (status, body) = body_json(custom).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], AUTHENTICATION_FAILED);
    }

    #[tokio::test]
    async fn test_conflict_message_is_visible() {
        let (status, body) = body_json(AppError::conflict("Email already registered".into())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Email already registered");
    }
}
