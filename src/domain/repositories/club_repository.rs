//! Repository trait for club data access.

use crate::domain::entities::{Club, ClubPatch, NewClub};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for club storage.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClubRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClubRepository: Send + Sync {
    /// Persists a new club.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name is already taken and
    /// [`AppError::Internal`] on database errors.
    async fn create(&self, new_club: NewClub) -> Result<Club, AppError>;

    /// Finds a club by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Club>, AppError>;

    /// Finds a club by exact (case-sensitive) name.
    ///
    /// Used for uniqueness checks before create/rename.
    async fn find_by_name(&self, name: &str) -> Result<Option<Club>, AppError>;

    /// Lists clubs newest first, optionally filtered by a case-insensitive
    /// substring match against name or description.
    async fn list(
        &self,
        search: Option<String>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Club>, AppError>;

    /// Counts clubs matching the same search filter as [`Self::list`].
    async fn count(&self, search: Option<String>) -> Result<i64, AppError>;

    /// Partially updates a club. `None` fields are unchanged.
    ///
    /// Returns `Ok(None)` if no such club exists.
    async fn update(&self, id: i64, patch: ClubPatch) -> Result<Option<Club>, AppError>;

    /// Deletes a club. Returns `Ok(false)` if it did not exist.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
