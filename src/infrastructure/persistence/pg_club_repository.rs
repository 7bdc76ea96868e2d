//! PostgreSQL implementation of the club repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Club, ClubPatch, NewClub};
use crate::domain::repositories::ClubRepository;
use crate::error::AppError;

/// PostgreSQL repository for club storage.
pub struct PgClubRepository {
    pool: Arc<PgPool>,
}

impl PgClubRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClubRepository for PgClubRepository {
    async fn create(&self, new_club: NewClub) -> Result<Club, AppError> {
        let club = sqlx::query_as::<_, Club>(
            r#"
            INSERT INTO clubs (name, image_url, image_storage_id, description, fb_link)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&new_club.name)
        .bind(&new_club.image_url)
        .bind(&new_club.image_storage_id)
        .bind(&new_club.description)
        .bind(&new_club.fb_link)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(club)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Club>, AppError> {
        let club = sqlx::query_as::<_, Club>("SELECT * FROM clubs WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(club)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Club>, AppError> {
        let club = sqlx::query_as::<_, Club>("SELECT * FROM clubs WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(club)
    }

    async fn list(
        &self,
        search: Option<String>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Club>, AppError> {
        let clubs = sqlx::query_as::<_, Club>(
            r#"
            SELECT * FROM clubs
            WHERE ($1::text IS NULL
                   OR name ILIKE '%' || $1 || '%'
                   OR description ILIKE '%' || $1 || '%')
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&search)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(clubs)
    }

    async fn count(&self, search: Option<String>) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM clubs
            WHERE ($1::text IS NULL
                   OR name ILIKE '%' || $1 || '%'
                   OR description ILIKE '%' || $1 || '%')
            "#,
        )
        .bind(&search)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn update(&self, id: i64, patch: ClubPatch) -> Result<Option<Club>, AppError> {
        let club = sqlx::query_as::<_, Club>(
            r#"
            UPDATE clubs
            SET name             = COALESCE($2::text, name),
                description      = COALESCE($3::text, description),
                fb_link          = COALESCE($4::text, fb_link),
                image_url        = COALESCE($5::text, image_url),
                image_storage_id = COALESCE($6::text, image_storage_id),
                updated_at       = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(&patch.fb_link)
        .bind(&patch.image_url)
        .bind(&patch.image_storage_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(club)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM clubs WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
