//! Handler for the analytics report endpoint.

use axum::{extract::State, Json};

use crate::api::dto::analytics::AnalyticsDto;
use crate::api::dto::envelope::ApiResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Computes the analytics snapshot.
///
/// # Endpoint
///
/// `GET /api/analytics`
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "message": "Analytics",
///   "data": {
///     "clubActivity": [{"key": "chess_club", "count": 5, "displayName": "Chess Club"}],
///     "popularityRanking": [{"key": "chess_club", "count": 4, "displayName": "Chess Club"}],
///     "userCensus": {"students": 12, "users": 12, "admins": 2, "superAdmins": 1}
///   }
/// }
/// ```
pub async fn analytics_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AnalyticsDto>>, AppError> {
    let report = state.analytics_service.get_analytics().await?;
    Ok(Json(ApiResponse::new("Analytics", report.into())))
}
