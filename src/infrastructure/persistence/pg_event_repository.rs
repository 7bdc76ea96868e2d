//! PostgreSQL implementation of the event repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Event, EventPatch, NewEvent};
use crate::domain::repositories::{ClubEventCount, DateOrder, EventFilter, EventRepository};
use crate::error::AppError;

/// PostgreSQL repository for event storage.
///
/// Button sequences are stored as JSONB in the `buttons` column and decoded
/// through the entity's `#[sqlx(json)]` field.
pub struct PgEventRepository {
    pool: Arc<PgPool>,
}

impl PgEventRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn create(&self, new_event: NewEvent) -> Result<Event, AppError> {
        let buttons = serde_json::to_value(&new_event.buttons)
            .map_err(|e| AppError::internal("Failed to encode buttons", json!({ "reason": e.to_string() })))?;

        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events
                (name, image_url, image_storage_id, date, buttons, club_id, created_by, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&new_event.name)
        .bind(&new_event.image_url)
        .bind(&new_event.image_storage_id)
        .bind(new_event.date)
        .bind(buttons)
        .bind(new_event.club_id)
        .bind(new_event.created_by)
        .bind(&new_event.description)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(event)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Event>, AppError> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(event)
    }

    async fn list(&self, filter: EventFilter) -> Result<Vec<Event>, AppError> {
        // Sort direction cannot be bound as a parameter; it comes from a
        // closed enum, never from user input.
        let order = match filter.order {
            DateOrder::Asc => "ASC",
            DateOrder::Desc => "DESC",
        };

        let sql = format!(
            r#"
            SELECT * FROM events
            WHERE ($1::bigint IS NULL OR club_id = $1)
              AND ($2::bigint IS NULL OR created_by = $2)
              AND ($3::timestamptz IS NULL OR date >= $3)
              AND ($4::timestamptz IS NULL OR date <= $4)
            ORDER BY date {order}
            LIMIT $5 OFFSET $6
            "#
        );

        let events = sqlx::query_as::<_, Event>(&sql)
            .bind(filter.club_id)
            .bind(filter.created_by)
            .bind(filter.from)
            .bind(filter.to)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(events)
    }

    async fn count(&self, filter: EventFilter) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM events
            WHERE ($1::bigint IS NULL OR club_id = $1)
              AND ($2::bigint IS NULL OR created_by = $2)
              AND ($3::timestamptz IS NULL OR date >= $3)
              AND ($4::timestamptz IS NULL OR date <= $4)
            "#,
        )
        .bind(filter.club_id)
        .bind(filter.created_by)
        .bind(filter.from)
        .bind(filter.to)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn update(&self, id: i64, patch: EventPatch) -> Result<Option<Event>, AppError> {
        let buttons = match &patch.buttons {
            Some(buttons) => Some(serde_json::to_value(buttons).map_err(|e| {
                AppError::internal("Failed to encode buttons", json!({ "reason": e.to_string() }))
            })?),
            None => None,
        };

        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET name             = COALESCE($2::text, name),
                date             = COALESCE($3::timestamptz, date),
                buttons          = COALESCE($4::jsonb, buttons),
                club_id          = COALESCE($5::bigint, club_id),
                description      = COALESCE($6::text, description),
                image_url        = COALESCE($7::text, image_url),
                image_storage_id = COALESCE($8::text, image_storage_id),
                updated_at       = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(patch.date)
        .bind(buttons)
        .bind(patch.club_id)
        .bind(&patch.description)
        .bind(&patch.image_url)
        .bind(&patch.image_storage_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(event)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_club(&self, club_id: i64) -> Result<Vec<Event>, AppError> {
        let events = sqlx::query_as::<_, Event>(
            "DELETE FROM events WHERE club_id = $1 RETURNING *",
        )
        .bind(club_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(events)
    }

    async fn count_by_club(&self) -> Result<Vec<ClubEventCount>, AppError> {
        let counts = sqlx::query_as::<_, ClubEventCount>(
            r#"
            SELECT c.id AS club_id, c.name AS club_name, COUNT(*) AS event_count
            FROM events e
            INNER JOIN clubs c ON c.id = e.club_id
            GROUP BY c.id, c.name
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(counts)
    }
}
