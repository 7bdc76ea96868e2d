//! Club entity.

use chrono::{DateTime, Utc};

/// A campus club with its hosted image and Facebook page.
///
/// The club owns its image in object storage: `image_storage_id` is the
/// opaque identifier used to delete the object when the image is replaced or
/// the club is removed.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Club {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub image_storage_id: String,
    pub description: String,
    pub fb_link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a club. The image has already been uploaded.
#[derive(Debug, Clone)]
pub struct NewClub {
    pub name: String,
    pub image_url: String,
    pub image_storage_id: String,
    pub description: String,
    pub fb_link: String,
}

/// Partial update for an existing club.
///
/// `None` fields are left unchanged. `image_url` and `image_storage_id` are
/// always set together when the image is replaced.
#[derive(Debug, Clone, Default)]
pub struct ClubPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub fb_link: Option<String>,
    pub image_url: Option<String>,
    pub image_storage_id: Option<String>,
}

impl ClubPatch {
    /// Returns true if no field would be modified.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.fb_link.is_none()
            && self.image_url.is_none()
            && self.image_storage_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch() {
        assert!(ClubPatch::default().is_empty());
    }

    #[test]
    fn test_patch_with_field_is_not_empty() {
        let patch = ClubPatch {
            name: Some("Chess Club".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
