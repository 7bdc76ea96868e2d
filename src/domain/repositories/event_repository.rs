//! Repository trait for event data access.

use crate::domain::entities::{Event, EventPatch, NewEvent};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Sort direction for event listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateOrder {
    /// Soonest first; used by the public event listing.
    #[default]
    Asc,
    /// Latest first; used by the per-creator listing.
    Desc,
}

/// Filter, pagination, and ordering for event listings.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub club_id: Option<i64>,
    pub created_by: Option<i64>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub offset: i64,
    pub limit: i64,
    pub order: DateOrder,
}

impl EventFilter {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset,
            limit,
            ..Default::default()
        }
    }

    pub fn with_club(mut self, club_id: Option<i64>) -> Self {
        self.club_id = club_id;
        self
    }

    pub fn with_creator(mut self, created_by: Option<i64>) -> Self {
        self.created_by = created_by;
        self
    }

    pub fn with_date_range(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn with_order(mut self, order: DateOrder) -> Self {
        self.order = order;
        self
    }
}

/// Per-club event tally joined to the club's display name.
///
/// Produced by an inner join, so clubs without events never appear and
/// events whose club was deleted under the orphan policy are skipped.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClubEventCount {
    pub club_id: i64,
    pub club_name: String,
    pub event_count: i64,
}

/// Repository interface for event storage.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgEventRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Persists a new event.
    async fn create(&self, new_event: NewEvent) -> Result<Event, AppError>;

    /// Finds an event by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Event>, AppError>;

    /// Lists events matching the filter, sorted by event date in the
    /// filter's order.
    async fn list(&self, filter: EventFilter) -> Result<Vec<Event>, AppError>;

    /// Counts events matching the filter (offset/limit/order ignored).
    async fn count(&self, filter: EventFilter) -> Result<i64, AppError>;

    /// Partially updates an event. `None` fields are unchanged.
    ///
    /// Returns `Ok(None)` if no such event exists.
    async fn update(&self, id: i64, patch: EventPatch) -> Result<Option<Event>, AppError>;

    /// Deletes an event. Returns `Ok(false)` if it did not exist.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Deletes every event referencing a club, returning the deleted rows
    /// so the caller can release their stored images.
    ///
    /// Only used by the `cascade` club deletion policy.
    async fn delete_by_club(&self, club_id: i64) -> Result<Vec<Event>, AppError>;

    /// Groups all events by club and counts each group, joined to the club
    /// name.
    ///
    /// Feeds the activity and popularity rankings in the analytics report.
    async fn count_by_club(&self) -> Result<Vec<ClubEventCount>, AppError>;
}
