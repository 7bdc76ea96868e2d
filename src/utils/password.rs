//! Password hashing and strength policy.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use serde_json::json;

use crate::error::AppError;

/// Hashes a plaintext password with Argon2id and a random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!(error = %e, "password hashing failed");
            AppError::internal("Failed to hash password", json!({}))
        })
}

/// Verifies a plaintext password against a stored Argon2 hash.
///
/// A malformed stored hash is an internal error, not a failed login.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(password_hash).map_err(|e| {
        tracing::error!(error = %e, "stored password hash is malformed");
        AppError::internal("Failed to verify password", json!({}))
    })?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Password strength policy: at least 8 characters with at least one letter
/// and one digit.
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    if password.chars().count() < 8 {
        return Err(AppError::bad_request(
            "Password must be at least 8 characters",
            json!({ "field": "password" }),
        ));
    }

    if !password.chars().any(|c| c.is_alphabetic()) || !password.chars().any(|c| c.is_ascii_digit())
    {
        return Err(AppError::bad_request(
            "Password must contain at least one letter and one digit",
            json!({ "field": "password" }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("correct-horse-7").unwrap();
        assert!(verify_password("correct-horse-7", &hash).unwrap());
        assert!(!verify_password("wrong-password-7", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same-password-1").unwrap();
        let b = hash_password("same-password-1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        let result = verify_password("anything1", "not-a-phc-string");
        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[test]
    fn test_policy_accepts_letter_and_digit_mix() {
        assert!(validate_password_strength("abcdefg1").is_ok());
        assert!(validate_password_strength("Str0ngPass!").is_ok());
    }

    #[test]
    fn test_policy_rejects_short_passwords() {
        let err = validate_password_strength("ab1").unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn test_policy_rejects_missing_character_classes() {
        assert!(validate_password_strength("onlyletters").is_err());
        assert!(validate_password_strength("12345678").is_err());
    }
}
