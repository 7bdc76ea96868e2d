//! Cookie-session authentication middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    Extension,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

use crate::domain::entities::Role;
use crate::error::AppError;
use crate::state::AppState;

/// Name of the session cookie set at login and cleared at logout.
pub const SESSION_COOKIE: &str = "token";

/// Verified session identity, inserted as a request extension for handlers
/// downstream of [`layer`].
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub id: i64,
    pub role: Role,
}

/// Authenticates requests using the JWT stored in the session cookie.
///
/// # Authentication Flow
///
/// 1. Extract the `token` cookie
/// 2. Verify the JWT signature and expiry
/// 3. Insert [`CurrentUser`] into request extensions
/// 4. Continue to the next middleware/handler
///
/// # Errors
///
/// Returns `401 Unauthorized` if the cookie is missing or the token fails
/// verification. The account is not re-read from the database here; role
/// changes take effect when the session is reissued.
pub async fn layer(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar.get(SESSION_COOKIE).map(|c| c.value()).ok_or_else(|| {
        AppError::unauthorized(
            "Authentication required",
            json!({ "reason": "missing session cookie" }),
        )
    })?;

    let claims = state.auth_service.verify_token(token)?;

    req.extensions_mut().insert(CurrentUser {
        id: claims.sub,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

/// Rejects authenticated requests whose session role is not `admin` or
/// `super-admin`.
///
/// Must run inside [`layer`], which provides the [`CurrentUser`] extension.
pub async fn require_admin(
    Extension(current_user): Extension<CurrentUser>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !current_user.role.is_admin() {
        return Err(AppError::unauthorized(
            "Admin access required",
            json!({ "role": current_user.role }),
        ));
    }

    Ok(next.run(req).await)
}
