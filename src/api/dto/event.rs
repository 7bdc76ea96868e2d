//! DTOs for event endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::api::dto::pagination::{DateRangeParams, PaginationMeta, PaginationParams};
use crate::domain::entities::{Event, EventButton};

/// Public view of an event.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub date: DateTime<Utc>,
    pub buttons: Vec<EventButton>,
    pub club_id: i64,
    pub created_by: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Event> for EventDto {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            name: event.name,
            image_url: event.image_url,
            date: event.date,
            buttons: event.buttons,
            club_id: event.club_id,
            created_by: event.created_by,
            description: event.description,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

/// Query parameters for `GET /api/events`.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct EventListQuery {
    /// Club id filter.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub club: Option<i64>,

    #[serde(flatten)]
    pub date_range: DateRangeParams,

    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Query parameters for `GET /api/events/creator/{createdBy}`.
#[derive(Debug, Deserialize)]
pub struct CreatorEventListQuery {
    #[serde(flatten)]
    pub date_range: DateRangeParams,

    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Paginated event listing.
#[derive(Debug, Serialize)]
pub struct EventListData {
    pub events: Vec<EventDto>,
    pub pagination: PaginationMeta,
}
