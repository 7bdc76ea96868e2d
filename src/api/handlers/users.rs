//! Handlers for account administration endpoints.
//!
//! All routes here sit behind the admin capability check in
//! [`crate::api::middleware::auth::require_admin`].

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::api::dto::envelope::ApiResponse;
use crate::api::dto::pagination::PaginationMeta;
use crate::api::dto::user::{CreateUserRequest, UpdateRoleRequest, UserDto, UserListData, UserListQuery};
use crate::domain::entities::Role;
use crate::error::AppError;
use crate::state::AppState;

/// Lists accounts with search, role filter, and pagination.
///
/// # Endpoint
///
/// `GET /api/users`
///
/// # Query Parameters
///
/// - `search` (optional): username/email substring
/// - `role` (optional): `user`, `admin`, or `super-admin`
/// - `page` (optional): page number (default: 1)
/// - `limit` (optional): items per page (default: 10, max: 100)
pub async fn list_users_handler(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<ApiResponse<UserListData>>, AppError> {
    let (offset, limit) = query
        .pagination
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (users, total) = state
        .user_service
        .list(query.search, query.role, offset, limit)
        .await?;

    Ok(Json(ApiResponse::new(
        "Users",
        UserListData {
            users: users.into_iter().map(Into::into).collect(),
            pagination: PaginationMeta::new(&query.pagination, total),
        },
    )))
}

/// Replaces an account's role.
///
/// # Endpoint
///
/// `PATCH /api/users/{id}/role`
pub async fn update_user_role_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateRoleRequest>,
) -> Result<Json<ApiResponse<UserDto>>, AppError> {
    let user = state.user_service.update_role(id, &body.role).await?;
    Ok(Json(ApiResponse::new("Role updated", user.into())))
}

/// Deletes an account.
///
/// # Endpoint
///
/// `DELETE /api/users/{id}`
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.user_service.delete(id).await?;
    Ok(Json(ApiResponse::new("User deleted", ())))
}

/// Creates an account with a caller-chosen role.
///
/// # Endpoint
///
/// `POST /api/users/create-user`
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), AppError> {
    let role = Role::parse(&body.role)
        .ok_or_else(|| AppError::bad_request("Invalid role", json!({ "role": body.role })))?;

    let user = state
        .user_service
        .create(&body.username, &body.email, &body.password, role)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("User created", user.into())),
    ))
}
