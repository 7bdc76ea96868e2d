//! Club management service.

use bytes::Bytes;
use regex::Regex;
use serde_json::json;
use std::sync::{Arc, LazyLock};

use crate::domain::entities::{Club, ClubPatch, NewClub};
use crate::domain::repositories::{ClubRepository, EventFilter, EventRepository};
use crate::error::AppError;
use crate::infrastructure::storage::ImageStorage;

/// Facebook page URL pattern required for `fb_link`.
static FB_LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://(www\.)?facebook\.com/.+").unwrap());

/// What happens to a club's events when the club is deleted.
///
/// `Orphan` matches the historically observed behavior and is the default;
/// orphaned events keep their `club_id` but drop out of the analytics
/// rankings (inner join).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClubDeletePolicy {
    #[default]
    Orphan,
    /// Refuse deletion while events still reference the club.
    Restrict,
    /// Delete referencing events and release their stored images.
    Cascade,
}

impl ClubDeletePolicy {
    /// Parses the policy from its configuration spelling.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "orphan" => Some(Self::Orphan),
            "restrict" => Some(Self::Restrict),
            "cascade" => Some(Self::Cascade),
            _ => None,
        }
    }
}

/// Fields for creating a club; the image travels separately as a buffer.
#[derive(Debug, Clone)]
pub struct CreateClubInput {
    pub name: String,
    pub description: String,
    pub fb_link: String,
}

/// Partial update fields; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateClubInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub fb_link: Option<String>,
}

/// Service managing clubs and their hosted images.
pub struct ClubService<C: ClubRepository, E: EventRepository> {
    club_repository: Arc<C>,
    event_repository: Arc<E>,
    storage: Arc<dyn ImageStorage>,
    delete_policy: ClubDeletePolicy,
}

impl<C: ClubRepository, E: EventRepository> ClubService<C, E> {
    /// Creates a new club service.
    pub fn new(
        club_repository: Arc<C>,
        event_repository: Arc<E>,
        storage: Arc<dyn ImageStorage>,
        delete_policy: ClubDeletePolicy,
    ) -> Self {
        Self {
            club_repository,
            event_repository,
            storage,
            delete_policy,
        }
    }

    /// Creates a club.
    ///
    /// The image is uploaded to object storage before the record is
    /// persisted; if persisting then fails, the uploaded object is orphaned
    /// (a storage leak, not a data-integrity violation).
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] on malformed fields
    /// - [`AppError::Conflict`] if the name is taken (case-sensitive)
    pub async fn create(&self, input: CreateClubInput, image: Bytes) -> Result<Club, AppError> {
        validate_name(&input.name)?;
        validate_description(&input.description)?;
        validate_fb_link(&input.fb_link)?;

        if self
            .club_repository
            .find_by_name(&input.name)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "Club with this name already exists",
                json!({ "field": "name", "name": input.name }),
            ));
        }

        let stored = self.storage.upload(image, "clubs").await?;

        self.club_repository
            .create(NewClub {
                name: input.name,
                image_url: stored.url,
                image_storage_id: stored.storage_id,
                description: input.description,
                fb_link: input.fb_link,
            })
            .await
    }

    /// Lists clubs newest first with an optional name/description substring
    /// search.
    pub async fn list(
        &self,
        search: Option<String>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Club>, i64), AppError> {
        let (clubs, total) = tokio::try_join!(
            self.club_repository.list(search.clone(), offset, limit),
            self.club_repository.count(search),
        )?;

        Ok((clubs, total))
    }

    /// Fetches a club by id.
    pub async fn get(&self, club_id: i64) -> Result<Club, AppError> {
        self.club_repository
            .find_by_id(club_id)
            .await?
            .ok_or_else(|| AppError::not_found("Club not found", json!({ "id": club_id })))
    }

    /// Partially updates a club, optionally replacing its image.
    ///
    /// Name uniqueness is re-checked only when the name actually changes.
    /// Image replacement is two-phase: upload the new object, persist the
    /// record, then delete the old object. A failed old-object delete is
    /// logged and swallowed; the record already points at the new image.
    pub async fn update(
        &self,
        club_id: i64,
        input: UpdateClubInput,
        new_image: Option<Bytes>,
    ) -> Result<Club, AppError> {
        let club = self.get(club_id).await?;

        let mut patch = ClubPatch::default();

        if let Some(name) = input.name {
            if name != club.name {
                validate_name(&name)?;
                if self.club_repository.find_by_name(&name).await?.is_some() {
                    return Err(AppError::conflict(
                        "Club with this name already exists",
                        json!({ "field": "name", "name": name }),
                    ));
                }
                patch.name = Some(name);
            }
        }

        if let Some(description) = input.description {
            validate_description(&description)?;
            patch.description = Some(description);
        }

        if let Some(fb_link) = input.fb_link {
            validate_fb_link(&fb_link)?;
            patch.fb_link = Some(fb_link);
        }

        let old_storage_id = match new_image {
            Some(image) => {
                let stored = self.storage.upload(image, "clubs").await?;
                patch.image_url = Some(stored.url);
                patch.image_storage_id = Some(stored.storage_id);
                Some(club.image_storage_id.clone())
            }
            None => None,
        };

        if patch.is_empty() {
            return Ok(club);
        }

        let updated = self
            .club_repository
            .update(club_id, patch)
            .await?
            .ok_or_else(|| AppError::not_found("Club not found", json!({ "id": club_id })))?;

        if let Some(storage_id) = old_storage_id {
            if let Err(e) = self.storage.delete(&storage_id).await {
                tracing::warn!(?e, storage_id, "failed to delete replaced club image");
            }
        }

        Ok(updated)
    }

    /// Deletes a club, its stored image, and (depending on policy) its
    /// events.
    ///
    /// # Errors
    ///
    /// With the `restrict` policy, returns [`AppError::Conflict`] while
    /// events still reference the club.
    pub async fn delete(&self, club_id: i64) -> Result<(), AppError> {
        let club = self.get(club_id).await?;

        match self.delete_policy {
            ClubDeletePolicy::Orphan => {}
            ClubDeletePolicy::Restrict => {
                let referencing = self
                    .event_repository
                    .count(EventFilter::default().with_club(Some(club_id)))
                    .await?;
                if referencing > 0 {
                    return Err(AppError::conflict(
                        "Club still has events",
                        json!({ "id": club_id, "events": referencing }),
                    ));
                }
            }
            ClubDeletePolicy::Cascade => {
                let deleted = self.event_repository.delete_by_club(club_id).await?;
                for event in deleted {
                    if let Err(e) = self.storage.delete(&event.image_storage_id).await {
                        tracing::warn!(
                            ?e,
                            event_id = event.id,
                            "failed to delete cascaded event image"
                        );
                    }
                }
            }
        }

        self.storage.delete(&club.image_storage_id).await?;

        if !self.club_repository.delete(club_id).await? {
            return Err(AppError::not_found(
                "Club not found",
                json!({ "id": club_id }),
            ));
        }

        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() || name.chars().count() > 100 {
        return Err(AppError::bad_request(
            "Club name is required and cannot exceed 100 characters",
            json!({ "field": "name" }),
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), AppError> {
    if description.trim().is_empty() || description.chars().count() > 500 {
        return Err(AppError::bad_request(
            "Description is required and cannot exceed 500 characters",
            json!({ "field": "description" }),
        ));
    }
    Ok(())
}

fn validate_fb_link(fb_link: &str) -> Result<(), AppError> {
    if !FB_LINK_REGEX.is_match(fb_link) {
        return Err(AppError::bad_request(
            "Please provide a valid Facebook URL",
            json!({ "field": "fbLink" }),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Event;
    use crate::domain::repositories::{MockClubRepository, MockEventRepository};
    use crate::infrastructure::storage::{MockImageStorage, StoredImage};
    use chrono::Utc;

    fn test_club(id: i64, name: &str) -> Club {
        Club {
            id,
            name: name.to_string(),
            image_url: format!("https://img.example.com/clubs/{id}"),
            image_storage_id: format!("clubs/{id}"),
            description: "A club".to_string(),
            fb_link: "https://facebook.com/club".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_event(id: i64, club_id: i64) -> Event {
        Event {
            id,
            name: format!("event{id}"),
            image_url: format!("https://img.example.com/events/{id}"),
            image_storage_id: format!("events/{id}"),
            date: Utc::now(),
            buttons: vec![],
            club_id,
            created_by: 1,
            description: "An event".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn stored(tag: &str) -> StoredImage {
        StoredImage {
            url: format!("https://img.example.com/{tag}"),
            storage_id: tag.to_string(),
        }
    }

    fn input(name: &str) -> CreateClubInput {
        CreateClubInput {
            name: name.to_string(),
            description: "Weekly meetings".to_string(),
            fb_link: "https://www.facebook.com/chessclub".to_string(),
        }
    }

    fn service(
        clubs: MockClubRepository,
        events: MockEventRepository,
        storage: MockImageStorage,
        policy: ClubDeletePolicy,
    ) -> ClubService<MockClubRepository, MockEventRepository> {
        ClubService::new(Arc::new(clubs), Arc::new(events), Arc::new(storage), policy)
    }

    #[tokio::test]
    async fn test_create_uploads_then_persists() {
        let mut clubs = MockClubRepository::new();
        let mut storage = MockImageStorage::new();

        clubs.expect_find_by_name().times(1).returning(|_| Ok(None));
        storage
            .expect_upload()
            .withf(|_, folder| folder == "clubs")
            .times(1)
            .returning(|_, _| Ok(stored("clubs/new")));
        clubs
            .expect_create()
            .withf(|new_club| new_club.image_storage_id == "clubs/new")
            .times(1)
            .returning(|new_club| {
                let mut club = test_club(1, &new_club.name);
                club.image_url = new_club.image_url;
                club.image_storage_id = new_club.image_storage_id;
                Ok(club)
            });

        let service = service(
            clubs,
            MockEventRepository::new(),
            storage,
            ClubDeletePolicy::Orphan,
        );

        let club = service
            .create(input("Chess Club"), Bytes::from_static(b"png"))
            .await
            .unwrap();
        assert_eq!(club.name, "Chess Club");
    }

    #[tokio::test]
    async fn test_create_duplicate_name_skips_upload() {
        let mut clubs = MockClubRepository::new();
        let mut storage = MockImageStorage::new();

        clubs
            .expect_find_by_name()
            .times(1)
            .returning(|name| Ok(Some(test_club(1, name))));
        storage.expect_upload().times(0);
        clubs.expect_create().times(0);

        let service = service(
            clubs,
            MockEventRepository::new(),
            storage,
            ClubDeletePolicy::Orphan,
        );

        let result = service
            .create(input("Chess Club"), Bytes::from_static(b"png"))
            .await;
        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_create_rejects_bad_fb_link() {
        let service = service(
            MockClubRepository::new(),
            MockEventRepository::new(),
            MockImageStorage::new(),
            ClubDeletePolicy::Orphan,
        );

        let mut bad = input("Chess Club");
        bad.fb_link = "https://twitter.com/chessclub".to_string();

        let result = service.create(bad, Bytes::from_static(b"png")).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_name_unchanged_skips_uniqueness_check() {
        let mut clubs = MockClubRepository::new();

        clubs
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(test_club(id, "Chess Club"))));
        // find_by_name must not run for an unchanged name.
        clubs.expect_find_by_name().times(0);
        clubs
            .expect_update()
            .withf(|_, patch| patch.name.is_none() && patch.description.is_some())
            .times(1)
            .returning(|id, _| Ok(Some(test_club(id, "Chess Club"))));

        let service = service(
            clubs,
            MockEventRepository::new(),
            MockImageStorage::new(),
            ClubDeletePolicy::Orphan,
        );

        let update = UpdateClubInput {
            name: Some("Chess Club".to_string()),
            description: Some("New description".to_string()),
            ..Default::default()
        };

        service.update(1, update, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_replaces_image_old_deleted_after_commit() {
        let mut clubs = MockClubRepository::new();
        let mut storage = MockImageStorage::new();

        clubs
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(test_club(id, "Chess Club"))));
        storage
            .expect_upload()
            .times(1)
            .returning(|_, _| Ok(stored("clubs/replacement")));
        clubs
            .expect_update()
            .withf(|_, patch| patch.image_storage_id.as_deref() == Some("clubs/replacement"))
            .times(1)
            .returning(|id, patch| {
                let mut club = test_club(id, "Chess Club");
                club.image_storage_id = patch.image_storage_id.unwrap();
                Ok(Some(club))
            });
        storage
            .expect_delete()
            .withf(|storage_id| storage_id == "clubs/1")
            .times(1)
            .returning(|_| Ok(()));

        let service = service(
            clubs,
            MockEventRepository::new(),
            storage,
            ClubDeletePolicy::Orphan,
        );

        let club = service
            .update(1, UpdateClubInput::default(), Some(Bytes::from_static(b"png")))
            .await
            .unwrap();
        assert_eq!(club.image_storage_id, "clubs/replacement");
    }

    #[tokio::test]
    async fn test_update_upload_failure_keeps_old_image() {
        let mut clubs = MockClubRepository::new();
        let mut storage = MockImageStorage::new();

        clubs
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(test_club(id, "Chess Club"))));
        storage
            .expect_upload()
            .times(1)
            .returning(|_, _| Err(AppError::internal("Image upload failed", json!({}))));
        // Neither the record nor the old object may be touched.
        clubs.expect_update().times(0);
        storage.expect_delete().times(0);

        let service = service(
            clubs,
            MockEventRepository::new(),
            storage,
            ClubDeletePolicy::Orphan,
        );

        let result = service
            .update(1, UpdateClubInput::default(), Some(Bytes::from_static(b"png")))
            .await;
        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_delete_orphan_leaves_events_alone() {
        let mut clubs = MockClubRepository::new();
        let mut events = MockEventRepository::new();
        let mut storage = MockImageStorage::new();

        clubs
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(test_club(id, "Chess Club"))));
        events.expect_count().times(0);
        events.expect_delete_by_club().times(0);
        storage
            .expect_delete()
            .withf(|storage_id| storage_id == "clubs/1")
            .times(1)
            .returning(|_| Ok(()));
        clubs.expect_delete().times(1).returning(|_| Ok(true));

        let service = service(clubs, events, storage, ClubDeletePolicy::Orphan);

        service.delete(1).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_restrict_refuses_referenced_club() {
        let mut clubs = MockClubRepository::new();
        let mut events = MockEventRepository::new();
        let mut storage = MockImageStorage::new();

        clubs
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(test_club(id, "Chess Club"))));
        events.expect_count().times(1).returning(|_| Ok(3));
        storage.expect_delete().times(0);
        clubs.expect_delete().times(0);

        let service = service(clubs, events, storage, ClubDeletePolicy::Restrict);

        let result = service.delete(1).await;
        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_delete_cascade_releases_event_images() {
        let mut clubs = MockClubRepository::new();
        let mut events = MockEventRepository::new();
        let mut storage = MockImageStorage::new();

        clubs
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(test_club(id, "Chess Club"))));
        events
            .expect_delete_by_club()
            .times(1)
            .returning(|club_id| Ok(vec![test_event(10, club_id), test_event(11, club_id)]));
        // Two event images plus the club image.
        storage.expect_delete().times(3).returning(|_| Ok(()));
        clubs.expect_delete().times(1).returning(|_| Ok(true));

        let service = service(clubs, events, storage, ClubDeletePolicy::Cascade);

        service.delete(1).await.unwrap();
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(ClubDeletePolicy::parse("orphan"), Some(ClubDeletePolicy::Orphan));
        assert_eq!(
            ClubDeletePolicy::parse("restrict"),
            Some(ClubDeletePolicy::Restrict)
        );
        assert_eq!(
            ClubDeletePolicy::parse("cascade"),
            Some(ClubDeletePolicy::Cascade)
        );
        assert_eq!(ClubDeletePolicy::parse("drop"), None);
    }
}
