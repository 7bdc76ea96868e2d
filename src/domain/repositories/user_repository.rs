//! Repository trait for account data access.

use crate::domain::entities::{NewUser, Role, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Search and pagination filter for listing accounts.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Case-insensitive substring match against username or email.
    pub search: Option<String>,
    pub role: Option<Role>,
    pub offset: i64,
    pub limit: i64,
}

impl UserFilter {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            search: None,
            role: None,
            offset,
            limit,
        }
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search;
        self
    }

    pub fn with_role(mut self, role: Option<Role>) -> Self {
        self.role = role;
        self
    }
}

/// Number of accounts holding a given role. Roles with zero accounts are
/// not represented.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoleCount {
    pub role: Role,
    pub count: i64,
}

/// Repository interface for account storage.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username or email is taken and
    /// [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds an account by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Finds an account by email (stored lowercased).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Finds an account matching either the username or the email.
    ///
    /// Used for uniqueness checks before registration.
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, AppError>;

    /// Lists accounts matching the filter, newest first.
    async fn list(&self, filter: UserFilter) -> Result<Vec<User>, AppError>;

    /// Counts accounts matching the filter (offset/limit ignored).
    async fn count(&self, filter: UserFilter) -> Result<i64, AppError>;

    /// Replaces an account's role.
    ///
    /// Returns `Ok(None)` if no such account exists.
    async fn update_role(&self, id: i64, role: Role) -> Result<Option<User>, AppError>;

    /// Deletes an account. Returns `Ok(false)` if it did not exist.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Groups all accounts by role and counts each group.
    ///
    /// Feeds the user census in the analytics report.
    async fn count_by_role(&self) -> Result<Vec<RoleCount>, AppError>;
}
