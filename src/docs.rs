use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use teslo_core::ErrorResponse;
use teslo_models::{AuthResponse, LoginRequest, RegisterRequest, Role, User, UserId};

use crate::modules::auth::controller::{PrivateResponse, RoleRouteResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::check_auth_status,
        crate::modules::auth::controller::private_route,
        crate::modules::auth::controller::admin_route,
        crate::modules::auth::controller::super_route,
    ),
    components(
        schemas(
            User,
            UserId,
            Role,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            PrivateResponse,
            RoleRouteResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and protected sample routes")
    ),
    info(
        title = "Teslo Auth API",
        version = "0.1.0",
        description = "Credential authentication and role-based access control built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
