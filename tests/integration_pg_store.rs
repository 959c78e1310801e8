mod common;

use sqlx::PgPool;
use std::collections::BTreeSet;

use common::generate_unique_email;
use teslo_db::{PgUserStore, StoreError, UserStore};
use teslo_models::{NewUser, Role, UserId};

fn new_user(email: &str, password_hash: Option<&str>, roles: &[Role]) -> NewUser {
    NewUser::with_roles(
        email.to_string(),
        "Pg Test".to_string(),
        password_hash.map(str::to_string),
        roles.iter().copied().collect(),
    )
}

async fn count_by_email(pool: &PgPool, email: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(email)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_email_is_conflict(pool: PgPool) {
    let store = PgUserStore::new(pool.clone());
    let email = generate_unique_email();

    store
        .insert(new_user(&email, Some("$2b$04$first"), &[Role::User]))
        .await
        .unwrap();

    let err = store
        .insert(new_user(&email, Some("$2b$04$second"), &[Role::Admin]))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Conflict { field: "email" }));
    assert_eq!(count_by_email(&pool, &email).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_email_lookup_is_exact(pool: PgPool) {
    let store = PgUserStore::new(pool);
    let email = generate_unique_email();
    store.insert(new_user(&email, None, &[Role::User])).await.unwrap();

    assert!(store.find_by_email(&email).await.unwrap().is_some());
    assert!(store.find_by_email(&email.to_uppercase()).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_secret_only_loaded_on_request(pool: PgPool) {
    let store = PgUserStore::new(pool);
    let email = generate_unique_email();
    let inserted = store
        .insert(new_user(&email, Some("$2b$04$stored-hash"), &[Role::User]))
        .await
        .unwrap();

    let user = store.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(user, inserted);
    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("password").is_none());
    assert!(json.get("password_hash").is_none());

    let record = store.find_by_email_with_secret(&email).await.unwrap().unwrap();
    assert_eq!(record.user, inserted);
    assert_eq!(record.password_hash.as_deref(), Some("$2b$04$stored-hash"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_password_reads_back_as_none(pool: PgPool) {
    let store = PgUserStore::new(pool);
    let email = generate_unique_email();
    store.insert(new_user(&email, None, &[Role::User])).await.unwrap();

    let record = store.find_by_email_with_secret(&email).await.unwrap().unwrap();
    assert!(record.password_hash.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_roles_round_trip(pool: PgPool) {
    let store = PgUserStore::new(pool);
    let email = generate_unique_email();
    let inserted = store
        .insert(new_user(&email, None, &[Role::Admin, Role::SuperUser]))
        .await
        .unwrap();

    let expected: BTreeSet<Role> = [Role::Admin, Role::SuperUser].into_iter().collect();
    assert_eq!(inserted.roles, expected);

    let loaded = store.find_by_id(inserted.id).await.unwrap().unwrap();
    assert_eq!(loaded.roles, expected);
    assert!(!loaded.has_role(Role::User));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_find_by_id_reports_inactive_and_missing(pool: PgPool) {
    let store = PgUserStore::new(pool.clone());
    let user = store
        .insert(new_user(&generate_unique_email(), None, &[Role::User]))
        .await
        .unwrap();
    assert!(user.is_active);

    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
        .bind(user.id.into_inner())
        .execute(&pool)
        .await
        .unwrap();

    let loaded = store.find_by_id(user.id).await.unwrap().unwrap();
    assert!(!loaded.is_active);
    assert!(store.find_by_id(UserId::new()).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_empty_role_set_rejected_by_schema(pool: PgPool) {
    let err = sqlx::query("INSERT INTO users (email, full_name, roles) VALUES ($1, $2, $3)")
        .bind(generate_unique_email())
        .bind("No Roles")
        .bind(Vec::<String>::new())
        .execute(&pool)
        .await
        .unwrap_err();

    let db_err = err.as_database_error().unwrap();
    assert_eq!(db_err.constraint(), Some("users_roles_not_empty"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_role_rejected_by_schema(pool: PgPool) {
    let err = sqlx::query("INSERT INTO users (email, full_name, roles) VALUES ($1, $2, $3)")
        .bind(generate_unique_email())
        .bind("Root")
        .bind(vec!["user".to_string(), "root".to_string()])
        .execute(&pool)
        .await
        .unwrap_err();

    let db_err = err.as_database_error().unwrap();
    assert_eq!(db_err.constraint(), Some("users_roles_known"));
}
