//! Request guards and extractors for protected routes.
//!
//! - [`auth`]: the identity guard, which turns a bearer token into an
//!   [`AuthenticatedIdentity`](auth::AuthenticatedIdentity)
//! - [`role`]: the role guard, which checks that identity against the
//!   [`RoleRegistry`](registry::RoleRegistry)
//! - [`registry`]: the per-operation role requirements
//! - [`extractors`]: handler access to the identity and raw headers
//!
//! # Guard chain
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `identity_guard` verifies the token and loads the active user, or returns 401
//! 3. `role_guard` looks up the operation's requirement, or returns 403
//! 4. The handler runs and reads the identity through an extractor
//!
//! Use [`guarded`] to attach both guards to a route in this order.

pub mod auth;
pub mod extractors;
pub mod registry;
pub mod role;

use axum::{middleware, routing::MethodRouter};

use crate::state::AppState;
use auth::identity_guard;
use registry::OperationKey;
use role::{RoleGuard, role_guard};

/// Wraps a route in the identity guard followed by the role guard for
/// `operation`.
///
/// ```rust,ignore
/// let router = Router::new().route(
///     "/private/admin",
///     guarded(get(admin_route), &state, operations::PRIVATE_ADMIN),
/// );
/// ```
pub fn guarded(
    route: MethodRouter<AppState>,
    state: &AppState,
    operation: OperationKey,
) -> MethodRouter<AppState> {
    // Layers added last run first.
    route
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(state.role_registry.clone(), operation),
            role_guard,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            identity_guard,
        ))
}
