use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::guarded;
use crate::state::AppState;

use super::controller::{
    admin_route, check_auth_status, login_user, private_route, register_user, super_route,
};
use super::policy::operations;

pub fn init_auth_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route(
            "/check-status",
            guarded(get(check_auth_status), state, operations::CHECK_STATUS),
        )
        .route(
            "/private",
            guarded(get(private_route), state, operations::PRIVATE),
        )
        .route(
            "/private/admin",
            guarded(get(admin_route), state, operations::PRIVATE_ADMIN),
        )
        .route(
            "/private/super",
            guarded(get(super_route), state, operations::PRIVATE_SUPER),
        )
}
