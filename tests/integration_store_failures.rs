mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;

use common::{
    BACKEND_FAILURE, FailingUserStore, TEST_PASSWORD, generate_unique_email, get_request,
    json_request, send_to, setup_router_with_store, test_jwt_config,
};
use teslo_auth::create_access_token;
use teslo_models::UserId;

fn assert_opaque_internal_error(status: StatusCode, body: &Value) {
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(*body, json!({ "error": "Internal server error" }));

    let raw = body.to_string();
    assert!(!raw.contains(BACKEND_FAILURE));
    assert!(!raw.contains("10.0.0.3"));
}

#[tokio::test]
async fn test_register_hides_store_failure() {
    let router = setup_router_with_store(Arc::new(FailingUserStore));

    let (status, body) = send_to(
        &router,
        json_request(
            "POST",
            "/api/auth/register",
            &json!({
                "email": generate_unique_email(),
                "password": TEST_PASSWORD,
                "full_name": "A"
            }),
        ),
    )
    .await;

    assert_opaque_internal_error(status, &body);
}

#[tokio::test]
async fn test_login_hides_store_failure() {
    let router = setup_router_with_store(Arc::new(FailingUserStore));

    let (status, body) = send_to(
        &router,
        json_request(
            "POST",
            "/api/auth/login",
            &json!({ "email": generate_unique_email(), "password": TEST_PASSWORD }),
        ),
    )
    .await;

    // An unreachable store is not the same as bad credentials.
    assert_opaque_internal_error(status, &body);
}

#[tokio::test]
async fn test_guarded_route_hides_store_failure() {
    let router = setup_router_with_store(Arc::new(FailingUserStore));
    let token =
        create_access_token(UserId::new().into_inner(), "a@x.com", &test_jwt_config()).unwrap();

    for uri in ["/api/auth/private", "/api/auth/private/admin", "/api/auth/check-status"] {
        let (status, body) = send_to(&router, get_request(uri, Some(&token))).await;
        assert_opaque_internal_error(status, &body);
    }
}

#[tokio::test]
async fn test_missing_token_short_circuits_before_store() {
    let router = setup_router_with_store(Arc::new(FailingUserStore));

    let (status, body) = send_to(&router, get_request("/api/auth/private", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}
