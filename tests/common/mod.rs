#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use http_body_util::BodyExt;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use tower::ServiceExt;

use teslo::modules::role_registry;
use teslo::router::init_router;
use teslo::state::AppState;
use teslo_auth::create_access_token;
use teslo_config::{CorsConfig, JwtConfig, MIN_BCRYPT_COST};
use teslo_core::PasswordHasher;
use teslo_db::{MemoryUserStore, StoreError, UserStore};
use teslo_models::{NewUser, Role, User, UserId, UserWithSecret};

pub const TEST_PASSWORD: &str = "Secret123";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryUserStore>,
}

pub struct TestUser {
    pub user: User,
    pub password: String,
    pub token: String,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

/// Full router over an empty in-memory store, hashing at bcrypt's minimum cost.
pub fn setup_test_app() -> TestApp {
    let store = Arc::new(MemoryUserStore::new());
    let state = test_state(store.clone());

    TestApp {
        router: init_router(state.clone()),
        state,
        store,
    }
}

/// Full router over an arbitrary store.
pub fn setup_router_with_store(users: Arc<dyn UserStore>) -> Router {
    init_router(test_state(users))
}

pub fn test_state(users: Arc<dyn UserStore>) -> AppState {
    AppState::new(
        users,
        test_jwt_config(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        PasswordHasher::new(MIN_BCRYPT_COST).unwrap(),
        role_registry().unwrap(),
    )
}

/// Store whose backend is unreachable. Every call fails with a message
/// that must never reach a client.
pub struct FailingUserStore;

pub const BACKEND_FAILURE: &str = "connection to 10.0.0.3:5432 refused";

impl FailingUserStore {
    fn error() -> StoreError {
        StoreError::InvalidRecord(BACKEND_FAILURE.to_string())
    }
}

#[async_trait]
impl UserStore for FailingUserStore {
    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
        Err(Self::error())
    }

    async fn find_by_email_with_secret(
        &self,
        _email: &str,
    ) -> Result<Option<UserWithSecret>, StoreError> {
        Err(Self::error())
    }

    async fn find_by_id(&self, _id: UserId) -> Result<Option<User>, StoreError> {
        Err(Self::error())
    }

    async fn insert(&self, _new_user: NewUser) -> Result<User, StoreError> {
        Err(Self::error())
    }
}

pub fn generate_unique_email() -> String {
    let email: String = SafeEmail().fake();
    format!("{}.{}", uuid::Uuid::new_v4().simple(), email)
}

pub fn generate_full_name() -> String {
    Name().fake()
}

/// Inserts a user straight into the store with the given roles and signs a
/// token for it.
pub async fn create_test_user(app: &TestApp, roles: &[Role]) -> TestUser {
    let password = TEST_PASSWORD.to_string();
    let hash = app.state.password_hasher.hash(&password).unwrap();
    let roles: BTreeSet<Role> = roles.iter().copied().collect();

    let user = app
        .store
        .insert(NewUser::with_roles(
            generate_unique_email(),
            generate_full_name(),
            Some(hash),
            roles,
        ))
        .await
        .unwrap();

    let token = create_access_token(user.id.into_inner(), &user.email, &test_jwt_config()).unwrap();

    TestUser {
        user,
        password,
        token,
    }
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Sends one request through a clone of the router and decodes the JSON body.
pub async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    send_to(&app.router, request).await
}

pub async fn send_to(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
