//! Field validation shared by the auth and user services.

use serde_json::json;
use validator::ValidateEmail;

use crate::error::AppError;

/// Usernames are 3 to 30 characters.
pub fn validate_username(username: &str) -> Result<(), AppError> {
    let length = username.chars().count();
    if !(3..=30).contains(&length) {
        return Err(AppError::bad_request(
            "Username must be between 3 and 30 characters",
            json!({ "field": "username" }),
        ));
    }
    Ok(())
}

/// Emails must be syntactically valid; callers store them lowercased.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    if !email.validate_email() {
        return Err(AppError::bad_request(
            "Please provide a valid email",
            json!({ "field": "email" }),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_bounds() {
        assert!(validate_username("ab").is_err());
        assert!(validate_username("abc").is_ok());
        assert!(validate_username(&"a".repeat(30)).is_ok());
        assert!(validate_username(&"a".repeat(31)).is_err());
    }

    #[test]
    fn test_email_format() {
        assert!(validate_email("student@campus.edu").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("@no-local-part.com").is_err());
    }
}
