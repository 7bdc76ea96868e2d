//! Event entity and call-to-action buttons.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Call-to-action button attached to an event.
///
/// Buttons are an ordered sequence stored as JSONB alongside the event row;
/// the URL is optional (a label-only button is allowed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventButton {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A club event.
///
/// `club_id` and `created_by` reference a [`super::Club`] and
/// [`super::User`]; both are validated at write time but not enforced by
/// foreign keys, so deleting a club may leave orphaned events depending on
/// the configured deletion policy.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub image_storage_id: String,
    pub date: DateTime<Utc>,
    #[sqlx(json)]
    pub buttons: Vec<EventButton>,
    pub club_id: i64,
    pub created_by: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating an event. The image has already been uploaded.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub image_url: String,
    pub image_storage_id: String,
    pub date: DateTime<Utc>,
    pub buttons: Vec<EventButton>,
    pub club_id: i64,
    pub created_by: i64,
    pub description: String,
}

/// Partial update for an existing event. `None` fields are unchanged.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub name: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub buttons: Option<Vec<EventButton>>,
    pub club_id: Option<i64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub image_storage_id: Option<String>,
}

impl EventPatch {
    /// Returns true if no field would be modified.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.date.is_none()
            && self.buttons.is_none()
            && self.club_id.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
            && self.image_storage_id.is_none()
    }
}
