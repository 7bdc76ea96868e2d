//! Registration, login, and session token handling.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{NewUser, Role, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::{hash_password, validate_password_strength, verify_password};
use crate::utils::validation::{validate_email, validate_username};

/// Claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account id.
    pub sub: i64,
    pub email: String,
    pub role: Role,
    /// Expiry as a Unix timestamp.
    pub exp: u64,
}

/// Service handling registration, credential checks, and JWT sessions.
///
/// Tokens are signed with HMAC-SHA256 using the configured secret and expire
/// after `token_ttl` (7 days by default, matching the session cookie).
pub struct AuthService<U: UserRepository> {
    user_repository: Arc<U>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
}

impl<U: UserRepository> AuthService<U> {
    /// Creates a new authentication service.
    pub fn new(user_repository: Arc<U>, jwt_secret: &str, token_ttl: Duration) -> Self {
        Self {
            user_repository,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            token_ttl,
        }
    }

    /// Registers a new account with the `user` role and issues a session
    /// token.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the username, email, or password fails
    ///   policy
    /// - [`AppError::Conflict`] if the username or email is already taken
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, String), AppError> {
        validate_username(username)?;
        validate_email(email)?;
        validate_password_strength(password)?;

        let email = email.to_lowercase();

        if self
            .user_repository
            .find_by_username_or_email(username, &email)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "User with this email or username already exists",
                json!({ "username": username, "email": email }),
            ));
        }

        let user = self
            .user_repository
            .create(NewUser {
                username: username.to_string(),
                email,
                password_hash: hash_password(password)?,
                role: Role::User,
            })
            .await?;

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Verifies credentials and issues a session token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] with a deliberately vague message
    /// whether the email is unknown or the password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AppError> {
        let invalid =
            || AppError::unauthorized("Invalid email or password", json!({ "field": "email" }));

        let user = self
            .user_repository
            .find_by_email(&email.to_lowercase())
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(invalid());
        }

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Loads the account behind a verified session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account no longer exists.
    pub async fn current_user(&self, user_id: i64) -> Result<User, AppError> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": user_id })))
    }

    /// Signs a session token for an account.
    pub fn issue_token(&self, user: &User) -> Result<String, AppError> {
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            exp: jsonwebtoken::get_current_timestamp() + self.token_ttl.as_secs(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "token signing failed");
            AppError::internal("Failed to issue session token", json!({}))
        })
    }

    /// Verifies a session token's signature and expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for tampered, malformed, or
    /// expired tokens.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| {
                AppError::unauthorized("Invalid token", json!({ "reason": "verification failed" }))
            })
    }
}
