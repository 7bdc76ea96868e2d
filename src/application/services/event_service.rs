//! Event management service.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{Event, EventButton, EventPatch, NewEvent};
use crate::domain::repositories::{
    ClubRepository, DateOrder, EventFilter, EventRepository,
};
use crate::error::AppError;
use crate::infrastructure::storage::ImageStorage;

/// Fields for creating an event; the image travels separately as a buffer.
#[derive(Debug, Clone)]
pub struct CreateEventInput {
    pub name: String,
    pub date: DateTime<Utc>,
    pub buttons: Vec<EventButton>,
    pub club_id: i64,
    pub description: String,
}

/// Partial update fields; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateEventInput {
    pub name: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub buttons: Option<Vec<EventButton>>,
    pub club_id: Option<i64>,
    pub description: Option<String>,
}

/// Service managing events and their hosted images.
pub struct EventService<E: EventRepository, C: ClubRepository> {
    event_repository: Arc<E>,
    club_repository: Arc<C>,
    storage: Arc<dyn ImageStorage>,
}

impl<E: EventRepository, C: ClubRepository> EventService<E, C> {
    /// Creates a new event service.
    pub fn new(
        event_repository: Arc<E>,
        club_repository: Arc<C>,
        storage: Arc<dyn ImageStorage>,
    ) -> Self {
        Self {
            event_repository,
            club_repository,
            storage,
        }
    }

    /// Creates an event on behalf of `created_by`.
    ///
    /// The referenced club is checked before anything is uploaded, so a
    /// bad `club_id` never leaves an orphaned object in storage.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] on malformed fields or a past date
    /// - [`AppError::NotFound`] if the club does not exist
    pub async fn create(
        &self,
        input: CreateEventInput,
        image: Bytes,
        created_by: i64,
    ) -> Result<Event, AppError> {
        validate_name(&input.name)?;
        validate_description(&input.description)?;
        validate_date(input.date)?;
        validate_buttons(&input.buttons)?;

        if self
            .club_repository
            .find_by_id(input.club_id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found(
                "Club not found",
                json!({ "id": input.club_id }),
            ));
        }

        let stored = self.storage.upload(image, "events").await?;

        self.event_repository
            .create(NewEvent {
                name: input.name,
                image_url: stored.url,
                image_storage_id: stored.storage_id,
                date: input.date,
                buttons: input.buttons,
                club_id: input.club_id,
                created_by,
                description: input.description,
            })
            .await
    }

    /// Lists events soonest first, optionally restricted to a club and a
    /// date window.
    pub async fn list(
        &self,
        club_id: Option<i64>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Event>, i64), AppError> {
        let filter = EventFilter::new(offset, limit)
            .with_club(club_id)
            .with_date_range(from, to)
            .with_order(DateOrder::Asc);

        let (events, total) = tokio::try_join!(
            self.event_repository.list(filter.clone()),
            self.event_repository.count(filter),
        )?;

        Ok((events, total))
    }

    /// Lists one creator's events latest first, optionally restricted to a
    /// date window.
    pub async fn list_by_creator(
        &self,
        created_by: i64,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Event>, i64), AppError> {
        let filter = EventFilter::new(offset, limit)
            .with_creator(Some(created_by))
            .with_date_range(from, to)
            .with_order(DateOrder::Desc);

        let (events, total) = tokio::try_join!(
            self.event_repository.list(filter.clone()),
            self.event_repository.count(filter),
        )?;

        Ok((events, total))
    }

    /// Fetches an event by id.
    pub async fn get(&self, event_id: i64) -> Result<Event, AppError> {
        self.event_repository
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found", json!({ "id": event_id })))
    }

    /// Partially updates an event, optionally replacing its image.
    ///
    /// A changed `club_id` is validated against the clubs table; a changed
    /// date must still be in the future. Image replacement follows the same
    /// two-phase scheme as clubs: upload, persist, then best-effort delete
    /// of the old object.
    pub async fn update(
        &self,
        event_id: i64,
        input: UpdateEventInput,
        new_image: Option<Bytes>,
    ) -> Result<Event, AppError> {
        let event = self.get(event_id).await?;

        let mut patch = EventPatch::default();

        if let Some(name) = input.name {
            validate_name(&name)?;
            patch.name = Some(name);
        }

        if let Some(date) = input.date {
            validate_date(date)?;
            patch.date = Some(date);
        }

        if let Some(buttons) = input.buttons {
            validate_buttons(&buttons)?;
            patch.buttons = Some(buttons);
        }

        if let Some(description) = input.description {
            validate_description(&description)?;
            patch.description = Some(description);
        }

        if let Some(club_id) = input.club_id {
            if club_id != event.club_id {
                if self.club_repository.find_by_id(club_id).await?.is_none() {
                    return Err(AppError::not_found(
                        "Club not found",
                        json!({ "id": club_id }),
                    ));
                }
            }
            patch.club_id = Some(club_id);
        }

        let old_storage_id = match new_image {
            Some(image) => {
                let stored = self.storage.upload(image, "events").await?;
                patch.image_url = Some(stored.url);
                patch.image_storage_id = Some(stored.storage_id);
                Some(event.image_storage_id.clone())
            }
            None => None,
        };

        if patch.is_empty() {
            return Ok(event);
        }

        let updated = self
            .event_repository
            .update(event_id, patch)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found", json!({ "id": event_id })))?;

        if let Some(storage_id) = old_storage_id {
            if let Err(e) = self.storage.delete(&storage_id).await {
                tracing::warn!(?e, storage_id, "failed to delete replaced event image");
            }
        }

        Ok(updated)
    }

    /// Deletes an event and its stored image.
    pub async fn delete(&self, event_id: i64) -> Result<(), AppError> {
        let event = self.get(event_id).await?;

        self.storage.delete(&event.image_storage_id).await?;

        if !self.event_repository.delete(event_id).await? {
            return Err(AppError::not_found(
                "Event not found",
                json!({ "id": event_id }),
            ));
        }

        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() || name.chars().count() > 100 {
        return Err(AppError::bad_request(
            "Event name is required and cannot exceed 100 characters",
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

fn validate_date(date: DateTime<Utc>) -> Result<(), AppError> {
    if date <= Utc::now() {
        return Err(AppError::bad_request(
            "Event date must be in the future",
            json!({ "field": "date" }),
        ));
    }
    Ok(())
}

fn validate_buttons(buttons: &[EventButton]) -> Result<(), AppError> {
    for (index, button) in buttons.iter().enumerate() {
        if button.label.trim().is_empty() || button.label.chars().count() > 50 {
            return Err(AppError::bad_request(
                "Button label is required and cannot exceed 50 characters",
                json!({ "field": "buttons", "index": index }),
            ));
        }
        if let Some(raw) = &button.url {
            let parsed = url::Url::parse(raw).map_err(|_| {
                AppError::bad_request(
                    "Button URL must be an http(s) URL",
                    json!({ "field": "buttons", "index": index }),
                )
            })?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(AppError::bad_request(
                    "Button URL must be an http(s) URL",
                    json!({ "field": "buttons", "index": index }),
                ));
            }
        }
    }
    Ok(())
}
