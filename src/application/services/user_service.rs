//! Account administration service.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{NewUser, Role, User};
use crate::domain::repositories::{UserFilter, UserRepository};
use crate::error::AppError;
use crate::utils::password::{hash_password, validate_password_strength};
use crate::utils::validation::{validate_email, validate_username};

/// Service for listing and administering accounts.
///
/// All operations here sit behind the admin capability check in the HTTP
/// layer; the service itself only enforces data rules.
pub struct UserService<U: UserRepository> {
    user_repository: Arc<U>,
}

impl<U: UserRepository> UserService<U> {
    /// Creates a new user service.
    pub fn new(user_repository: Arc<U>) -> Self {
        Self { user_repository }
    }

    /// Lists accounts newest first with an optional username/email substring
    /// search and an optional role filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `role` is outside the enumerated
    /// set.
    pub async fn list(
        &self,
        search: Option<String>,
        role: Option<String>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<User>, i64), AppError> {
        let role = match role.as_deref() {
            Some(value) => Some(Role::parse(value).ok_or_else(|| {
                AppError::bad_request("Invalid role", json!({ "role": value }))
            })?),
            None => None,
        };

        let filter = UserFilter::new(offset, limit)
            .with_search(search)
            .with_role(role);

        let (users, total) = tokio::try_join!(
            self.user_repository.list(filter.clone()),
            self.user_repository.count(filter),
        )?;

        Ok((users, total))
    }

    /// Replaces an account's role.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if `role` is outside the enumerated set
    /// - [`AppError::NotFound`] if the account does not exist
    pub async fn update_role(&self, user_id: i64, role: &str) -> Result<User, AppError> {
        let role = Role::parse(role)
            .ok_or_else(|| AppError::bad_request("Invalid role", json!({ "role": role })))?;

        self.user_repository
            .update_role(user_id, role)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": user_id })))
    }

    /// Deletes an account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account does not exist.
    pub async fn delete(&self, user_id: i64) -> Result<(), AppError> {
        if !self.user_repository.delete(user_id).await? {
            return Err(AppError::not_found(
                "User not found",
                json!({ "id": user_id }),
            ));
        }
        Ok(())
    }

    /// Creates an account with a caller-supplied role.
    ///
    /// Applies the same field and uniqueness rules as registration.
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<User, AppError> {
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

        self.user_repository
            .create(NewUser {
                username: username.to_string(),
                email,
                password_hash: hash_password(password)?,
                role,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use chrono::Utc;

    fn test_user(id: i64, role: Role) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@campus.edu"),
            password_hash: "$argon2id$fake".to_string(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_list_parses_role_filter() {
        let mut repo = MockUserRepository::new();

        repo.expect_list()
            .withf(|filter| filter.role == Some(Role::Admin) && filter.limit == 10)
            .times(1)
            .returning(|_| Ok(vec![test_user(1, Role::Admin)]));
        repo.expect_count()
            .withf(|filter| filter.role == Some(Role::Admin))
            .times(1)
            .returning(|_| Ok(1));

        let service = UserService::new(Arc::new(repo));

        let (users, total) = service
            .list(None, Some("admin".to_string()), 0, 10)
            .await
            .unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_list_rejects_unknown_role() {
        let mut repo = MockUserRepository::new();
        repo.expect_list().times(0);

        let service = UserService::new(Arc::new(repo));

        let result = service.list(None, Some("wizard".to_string()), 0, 10).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_role_success() {
        let mut repo = MockUserRepository::new();

        repo.expect_update_role()
            .withf(|id, role| *id == 5 && *role == Role::SuperAdmin)
            .times(1)
            .returning(|id, role| Ok(Some(test_user(id, role))));

        let service = UserService::new(Arc::new(repo));

        let user = service.update_role(5, "super-admin").await.unwrap();
        assert_eq!(user.role, Role::SuperAdmin);
    }

    #[tokio::test]
    async fn test_update_role_invalid_role() {
        let mut repo = MockUserRepository::new();
        repo.expect_update_role().times(0);

        let service = UserService::new(Arc::new(repo));

        let result = service.update_role(5, "owner").await;
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_role_missing_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_update_role().times(1).returning(|_, _| Ok(None));

        let service = UserService::new(Arc::new(repo));

        let result = service.update_role(404, "admin").await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().times(1).returning(|_| Ok(false));

        let service = UserService::new(Arc::new(repo));

        let result = service.delete(404).await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_create_with_supplied_role() {
        let mut repo = MockUserRepository::new();

        repo.expect_find_by_username_or_email()
            .times(1)
            .returning(|_, _| Ok(None));
        repo.expect_create()
            .withf(|new_user| new_user.role == Role::Admin && new_user.email == "carol@campus.edu")
            .times(1)
            .returning(|new_user| {
                let mut user = test_user(3, new_user.role);
                user.username = new_user.username;
                user.email = new_user.email;
                Ok(user)
            });

        let service = UserService::new(Arc::new(repo));

        let user = service
            .create("carol", "Carol@Campus.edu", "password1", Role::Admin)
            .await
            .unwrap();

        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.email, "carol@campus.edu");
    }

    #[tokio::test]
    async fn test_create_duplicate_is_conflict() {
        let mut repo = MockUserRepository::new();

        repo.expect_find_by_username_or_email()
            .times(1)
            .returning(|_, _| Ok(Some(test_user(1, Role::User))));
        repo.expect_create().times(0);

        let service = UserService::new(Arc::new(repo));

        let result = service
            .create("user1", "user1@campus.edu", "password1", Role::User)
            .await;
        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }
}
