//! Handlers for event endpoints.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde_json::json;

use crate::api::dto::envelope::ApiResponse;
use crate::api::dto::event::{CreatorEventListQuery, EventDto, EventListData, EventListQuery};
use crate::api::dto::pagination::PaginationMeta;
use crate::api::middleware::auth::CurrentUser;
use crate::api::upload::UploadForm;
use crate::application::services::{CreateEventInput, UpdateEventInput};
use crate::domain::entities::EventButton;
use crate::error::AppError;
use crate::state::AppState;

/// Parses the `date` form field as RFC3339.
fn parse_date(raw: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            AppError::bad_request(
                "Date must be an RFC3339 timestamp",
                json!({ "field": "date", "value": raw }),
            )
        })
}

/// Parses the `clubId` form field.
fn parse_club_id(raw: &str) -> Result<i64, AppError> {
    raw.parse().map_err(|_| {
        AppError::bad_request(
            "clubId must be an integer",
            json!({ "field": "clubId", "value": raw }),
        )
    })
}

/// Parses the `buttons` form field, a JSON-encoded array.
fn parse_buttons(raw: &str) -> Result<Vec<EventButton>, AppError> {
    serde_json::from_str(raw).map_err(|e| {
        AppError::bad_request(
            "buttons must be a JSON array of {label, url?} objects",
            json!({ "field": "buttons", "reason": e.to_string() }),
        )
    })
}

/// Creates an event from a multipart form.
///
/// # Endpoint
///
/// `POST /api/events`
///
/// # Form Fields
///
/// - `name` (required): at most 100 characters
/// - `description` (required): at most 500 characters
/// - `date` (required): RFC3339, must be in the future
/// - `clubId` (required): id of an existing club
/// - `buttons` (optional): JSON-encoded array of `{label, url?}` objects
/// - `image` (required): the event image file
///
/// The creator is taken from the session, never from the form.
pub async fn create_event_handler(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<EventDto>>), AppError> {
    let mut form = UploadForm::parse(multipart, state.max_upload_bytes).await?;

    let input = CreateEventInput {
        name: form.require_text("name")?.to_string(),
        description: form.require_text("description")?.to_string(),
        date: parse_date(form.require_text("date")?)?,
        club_id: parse_club_id(form.require_text("clubId")?)?,
        buttons: form.text("buttons").map(parse_buttons).transpose()?.unwrap_or_default(),
    };
    let image = form.require_image()?;

    let event = state
        .event_service
        .create(input, image, current_user.id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Event created", event.into())),
    ))
}

/// Lists events soonest first.
///
/// # Endpoint
///
/// `GET /api/events`
///
/// # Query Parameters
///
/// - `club` (optional): club id filter
/// - `startDate`, `endDate` (optional): RFC3339 date window
/// - `page`, `limit` (optional): pagination
pub async fn list_events_handler(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> Result<Json<ApiResponse<EventListData>>, AppError> {
    let (offset, limit) = query
        .pagination
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (events, total) = state
        .event_service
        .list(
            query.club,
            query.date_range.start_date,
            query.date_range.end_date,
            offset,
            limit,
        )
        .await?;

    Ok(Json(ApiResponse::new(
        "Events",
        EventListData {
            events: events.into_iter().map(Into::into).collect(),
            pagination: PaginationMeta::new(&query.pagination, total),
        },
    )))
}

/// Fetches one event.
///
/// # Endpoint
///
/// `GET /api/events/{id}`
pub async fn get_event_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<EventDto>>, AppError> {
    let event = state.event_service.get(id).await?;
    Ok(Json(ApiResponse::new("Event", event.into())))
}

/// Lists one creator's events latest first.
///
/// # Endpoint
///
/// `GET /api/events/creator/{createdBy}`
///
/// # Query Parameters
///
/// - `startDate`, `endDate` (optional): RFC3339 date window
/// - `page`, `limit` (optional): pagination
pub async fn list_events_by_creator_handler(
    State(state): State<AppState>,
    Path(created_by): Path<i64>,
    Query(query): Query<CreatorEventListQuery>,
) -> Result<Json<ApiResponse<EventListData>>, AppError> {
    let (offset, limit) = query
        .pagination
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (events, total) = state
        .event_service
        .list_by_creator(
            created_by,
            query.date_range.start_date,
            query.date_range.end_date,
            offset,
            limit,
        )
        .await?;

    Ok(Json(ApiResponse::new(
        "Events",
        EventListData {
            events: events.into_iter().map(Into::into).collect(),
            pagination: PaginationMeta::new(&query.pagination, total),
        },
    )))
}

/// Partially updates an event from a multipart form.
///
/// # Endpoint
///
/// `PATCH /api/events/{id}`
///
/// All form fields are optional; an `image` part replaces the hosted image.
pub async fn update_event_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<EventDto>>, AppError> {
    let mut form = UploadForm::parse(multipart, state.max_upload_bytes).await?;

    let input = UpdateEventInput {
        name: form.text("name").map(str::to_string),
        description: form.text("description").map(str::to_string),
        date: form.text("date").map(parse_date).transpose()?,
        club_id: form.text("clubId").map(parse_club_id).transpose()?,
        buttons: form.text("buttons").map(parse_buttons).transpose()?,
    };
    let image = form.take_image();

    let event = state.event_service.update(id, input, image).await?;

    Ok(Json(ApiResponse::new("Event updated", event.into())))
}

/// Deletes an event and its hosted image.
///
/// # Endpoint
///
/// `DELETE /api/events/{id}`
pub async fn delete_event_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.event_service.delete(id).await?;
    Ok(Json(ApiResponse::new("Event deleted", ())))
}
