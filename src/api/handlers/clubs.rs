//! Handlers for club endpoints.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::api::dto::club::{ClubDto, ClubListData, ClubListQuery};
use crate::api::dto::envelope::ApiResponse;
use crate::api::dto::pagination::PaginationMeta;
use crate::api::upload::UploadForm;
use crate::application::services::{CreateClubInput, UpdateClubInput};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a club from a multipart form.
///
/// # Endpoint
///
/// `POST /api/clubs`
///
/// # Form Fields
///
/// - `name` (required): unique, at most 100 characters
/// - `description` (required): at most 500 characters
/// - `fbLink` (required): Facebook page URL
/// - `image` (required): the club image file
pub async fn create_club_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ClubDto>>), AppError> {
    let mut form = UploadForm::parse(multipart, state.max_upload_bytes).await?;

    let input = CreateClubInput {
        name: form.require_text("name")?.to_string(),
        description: form.require_text("description")?.to_string(),
        fb_link: form.require_text("fbLink")?.to_string(),
    };
    let image = form.require_image()?;

    let club = state.club_service.create(input, image).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Club created", club.into())),
    ))
}

/// Lists clubs newest first.
///
/// # Endpoint
///
/// `GET /api/clubs`
///
/// # Query Parameters
///
/// - `search` (optional): name/description substring
/// - `page`, `limit` (optional): pagination
pub async fn list_clubs_handler(
    State(state): State<AppState>,
    Query(query): Query<ClubListQuery>,
) -> Result<Json<ApiResponse<ClubListData>>, AppError> {
    let (offset, limit) = query
        .pagination
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (clubs, total) = state.club_service.list(query.search, offset, limit).await?;

    Ok(Json(ApiResponse::new(
        "Clubs",
        ClubListData {
            clubs: clubs.into_iter().map(Into::into).collect(),
            pagination: PaginationMeta::new(&query.pagination, total),
        },
    )))
}

/// Fetches one club.
///
/// # Endpoint
///
/// `GET /api/clubs/{id}`
pub async fn get_club_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ClubDto>>, AppError> {
    let club = state.club_service.get(id).await?;
    Ok(Json(ApiResponse::new("Club", club.into())))
}

/// Partially updates a club from a multipart form.
///
/// # Endpoint
///
/// `PATCH /api/clubs/{id}`
///
/// All form fields are optional; an `image` part replaces the hosted image.
pub async fn update_club_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<ClubDto>>, AppError> {
    let mut form = UploadForm::parse(multipart, state.max_upload_bytes).await?;

    let input = UpdateClubInput {
        name: form.text("name").map(str::to_string),
        description: form.text("description").map(str::to_string),
        fb_link: form.text("fbLink").map(str::to_string),
    };
    let image = form.take_image();

    let club = state.club_service.update(id, input, image).await?;

    Ok(Json(ApiResponse::new("Club updated", club.into())))
}

/// Deletes a club and its hosted image.
///
/// # Endpoint
///
/// `DELETE /api/clubs/{id}`
///
/// What happens to the club's events depends on the configured deletion
/// policy; with `restrict` the request fails while events still reference
/// the club.
pub async fn delete_club_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.club_service.delete(id).await?;
    Ok(Json(ApiResponse::new("Club deleted", ())))
}
