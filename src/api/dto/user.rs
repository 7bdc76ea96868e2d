//! DTOs for account listings and administration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::dto::pagination::{PaginationMeta, PaginationParams};
use crate::domain::entities::{Role, User};

/// Public view of an account; never exposes the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Query parameters for `GET /api/users`.
#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub search: Option<String>,
    pub role: Option<String>,

    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Paginated account listing.
#[derive(Debug, Serialize)]
pub struct UserListData {
    pub users: Vec<UserDto>,
    pub pagination: PaginationMeta,
}

/// Body for `PATCH /api/users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

/// Body for `POST /api/users/create-user`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}
