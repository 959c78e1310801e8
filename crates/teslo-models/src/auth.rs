//! Authentication request and response DTOs.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utoipa::ToSchema;
use teslo_config::MAX_PASSWORD_BYTES;
use validator::{Validate, ValidationError};

use crate::users::User;

/// Registration request.
#[derive(Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "email must be a valid email address"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    #[validate(
        length(min = 6, max = 50, message = "password must be between 6 and 50 characters"),
        custom(function = "validate_password_strength")
    )]
    #[schema(example = "Secret123")]
    pub password: String,
    #[validate(length(min = 1, message = "full_name is required"))]
    #[schema(example = "Jane Doe")]
    pub full_name: String,
}

/// Login request with email and password.
#[derive(Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid email address"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "Secret123")]
    pub password: String,
}

/// Returned by register, login and check-status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

// Requests hold plaintext passwords; keep them out of logs and spans.
impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Requires an uppercase letter, a lowercase letter, and a digit or symbol.
/// Also caps the encoded length, since bcrypt ignores bytes past the cap.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password_bytes").with_message(Cow::Owned(format!(
            "password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        ))));
    }

    let has_upper = password.chars().any(char::is_uppercase);
    let has_lower = password.chars().any(char::is_lowercase);
    let has_digit_or_symbol = password
        .chars()
        .any(|c| c.is_ascii_digit() || !(c.is_alphanumeric() || c == '_'));

    if has_upper && has_lower && has_digit_or_symbol {
        Ok(())
    } else {
        Err(ValidationError::new("password_strength").with_message(Cow::Borrowed(
            "password must have an uppercase letter, a lowercase letter and a number",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str, password: &str, full_name: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            full_name: full_name.to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(register("a@x.com", "Secret123", "A").validate().is_ok());
        assert!(register("a@x.com", "Secret!x", "A").validate().is_ok());
    }

    #[test]
    fn test_invalid_email() {
        let errors = register("not-an-email", "Secret123", "A").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_weak_passwords() {
        let too_long = "Aa1".repeat(20);
        for weak in ["secret123", "SECRET123", "Secretxyz", "Se1", too_long.as_str()] {
            let errors = register("a@x.com", weak, "A").validate().unwrap_err();
            assert!(errors.field_errors().contains_key("password"), "{weak} accepted");
        }
    }

    #[test]
    fn test_multibyte_password_over_byte_cap() {
        // Within the character limit but past bcrypt's 72 bytes.
        let password = format!("Aa1{}x", "é".repeat(35));
        let errors = register("a@x.com", &password, "A").validate().unwrap_err();
        let field_errors = errors.field_errors();
        assert!(field_errors["password"].iter().any(|e| e.code == "password_bytes"));

        let fits = format!("Aa1{}", "é".repeat(34));
        assert!(register("a@x.com", &fits, "A").validate().is_ok());
    }

    #[test]
    fn test_empty_full_name() {
        let errors = register("a@x.com", "Secret123", "").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("full_name"));
    }

    #[test]
    fn test_login_accepts_any_non_empty_password() {
        let login = LoginRequest {
            email: "a@x.com".to_string(),
            password: "wrong".to_string(),
        };
        assert!(login.validate().is_ok());
    }

    #[test]
    fn test_debug_hides_password() {
        let debug = format!("{:?}", register("a@x.com", "Secret123", "A"));
        assert!(!debug.contains("Secret123"));
    }
}
