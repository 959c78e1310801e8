use teslo_config::{MAX_PASSWORD_BYTES, MIN_BCRYPT_COST};
use teslo_core::{PasswordHasher, hash_password_with_cost, verify_password};

#[test]
fn test_hash_password_success() {
    let password = "testpassword123";
    let hash = hash_password_with_cost(password, MIN_BCRYPT_COST).unwrap();

    assert!(!hash.is_empty());
    assert_ne!(hash, password);
}

#[test]
fn test_verify_password_correct() {
    let hasher = PasswordHasher::new(MIN_BCRYPT_COST).unwrap();
    let hash = hasher.hash("correctpassword").unwrap();

    assert!(verify_password("correctpassword", &hash).unwrap());
}

#[test]
fn test_verify_password_incorrect() {
    let hasher = PasswordHasher::new(MIN_BCRYPT_COST).unwrap();
    let hash = hasher.hash("correctpassword").unwrap();

    assert!(!hasher.verify("wrongpassword", &hash).unwrap());
}

#[test]
fn test_same_password_different_salts() {
    let hasher = PasswordHasher::new(MIN_BCRYPT_COST).unwrap();
    let first = hasher.hash("samepassword").unwrap();
    let second = hasher.hash("samepassword").unwrap();

    assert_ne!(first, second);
    assert!(hasher.verify("samepassword", &first).unwrap());
    assert!(hasher.verify("samepassword", &second).unwrap());
}

#[test]
fn test_hash_is_bcrypt_at_configured_cost() {
    let hasher = PasswordHasher::new(MIN_BCRYPT_COST).unwrap();
    let hash = hasher.hash("password").unwrap();

    assert!(hash.starts_with("$2b$04$"));
    assert_eq!(hash.len(), 60);
}

#[test]
fn test_verify_against_malformed_hash_errors() {
    assert!(verify_password("password", "not-a-hash").is_err());
}

#[test]
fn test_dummy_verification_never_matches() {
    let hasher = PasswordHasher::new(MIN_BCRYPT_COST).unwrap();
    assert!(!hasher.verify_dummy("teslo-dummy-password"));
    assert!(!hasher.verify_dummy(""));
}

#[test]
fn test_multibyte_password_over_limit_rejected() {
    let hasher = PasswordHasher::new(MIN_BCRYPT_COST).unwrap();
    // 39 characters, 74 bytes.
    let password = format!("Aa1{}x", "é".repeat(35));
    assert!(password.chars().count() <= 50);
    assert!(password.len() > MAX_PASSWORD_BYTES);

    assert!(hasher.hash(&password).is_err());
}
