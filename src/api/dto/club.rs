//! DTOs for club endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::dto::pagination::{PaginationMeta, PaginationParams};
use crate::domain::entities::Club;

/// Public view of a club.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubDto {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub description: String,
    pub fb_link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Club> for ClubDto {
    fn from(club: Club) -> Self {
        Self {
            id: club.id,
            name: club.name,
            image_url: club.image_url,
            description: club.description,
            fb_link: club.fb_link,
            created_at: club.created_at,
            updated_at: club.updated_at,
        }
    }
}

/// Query parameters for `GET /api/clubs`.
#[derive(Debug, Deserialize)]
pub struct ClubListQuery {
    pub search: Option<String>,

    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Paginated club listing.
#[derive(Debug, Serialize)]
pub struct ClubListData {
    pub clubs: Vec<ClubDto>,
    pub pagination: PaginationMeta,
}
