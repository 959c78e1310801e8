//! Role-based authorization middleware.
//!
//! [`role_guard`] runs after [`identity_guard`](super::auth::identity_guard)
//! and reads the [`AuthenticatedIdentity`] it left in the request extensions.
//! The roles required for the route come from the shared [`RoleRegistry`];
//! the caller passes if it holds any one of them.
//!
//! # Usage
//!
//! ```rust,ignore
//! use axum::{middleware, routing::get};
//! use crate::middleware::role::{RoleGuard, role_guard};
//!
//! let route = get(handler).route_layer(middleware::from_fn_with_state(
//!     RoleGuard::new(state.role_registry.clone(), DELETE_PRODUCT),
//!     role_guard,
//! ));
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use teslo_core::AppError;
use teslo_models::User;

use crate::metrics::track_guard_rejection;
use crate::middleware::auth::AuthenticatedIdentity;
use crate::middleware::registry::{OperationKey, RoleRegistry, RoleRequirement};

/// Middleware state binding a route to its operation key.
#[derive(Debug, Clone)]
pub struct RoleGuard {
    registry: Arc<RoleRegistry>,
    operation: OperationKey,
}

impl RoleGuard {
    pub fn new(registry: Arc<RoleRegistry>, operation: OperationKey) -> Self {
        Self {
            registry,
            operation,
        }
    }

    pub fn requirement(&self) -> Option<&RoleRequirement> {
        self.registry.lookup(self.operation)
    }
}

pub async fn role_guard(
    State(guard): State<RoleGuard>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Reaching this guard without an identity is a wiring bug, not a client error.
    let identity = req
        .extensions()
        .get::<AuthenticatedIdentity>()
        .ok_or_else(|| {
            AppError::internal_error(format!(
                "role guard for `{}` ran without an authenticated identity",
                guard.operation
            ))
        })?;

    if let Err(err) = check_requirement(identity.user(), guard.requirement()) {
        debug!(
            operation = %guard.operation,
            user_id = %identity.user_id(),
            "Role guard rejected request"
        );
        track_guard_rejection("role");
        return Err(err);
    }

    Ok(next.run(req).await)
}

/// Any-of check. No requirement, or an empty one, lets every user through.
pub fn check_requirement(
    user: &User,
    requirement: Option<&RoleRequirement>,
) -> Result<(), AppError> {
    match requirement {
        None => Ok(()),
        Some(required) if required.is_empty() => Ok(()),
        Some(required) if user.has_any_role(required) => Ok(()),
        Some(_) => Err(AppError::forbidden()),
    }
}
