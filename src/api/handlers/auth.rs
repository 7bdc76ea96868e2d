//! Handlers for registration, login, and session endpoints.

use axum::{extract::State, http::StatusCode, Extension, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::api::dto::auth::{LoginRequest, RegisterRequest};
use crate::api::dto::envelope::ApiResponse;
use crate::api::dto::user::UserDto;
use crate::api::middleware::auth::{CurrentUser, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

/// Builds the session cookie carrying a signed JWT.
///
/// HttpOnly and SameSite=Strict; the 7-day lifetime matches the token's
/// own expiry.
fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::days(7))
        .build()
}

/// Registers a new account and starts a session.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Response Codes
///
/// - **201 Created**: account created, session cookie set
/// - **400 Bad Request**: field validation failed, or username/email taken
pub async fn register_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<ApiResponse<UserDto>>), AppError> {
    let (user, token) = state
        .auth_service
        .register(&body.username, &body.email, &body.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        jar.add(session_cookie(token)),
        Json(ApiResponse::new("Registered successfully", user.into())),
    ))
}

/// Verifies credentials and starts a session.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Response Codes
///
/// - **200 OK**: session cookie set
/// - **401 Unauthorized**: unknown email or wrong password (same message
///   for both)
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<UserDto>>), AppError> {
    let (user, token) = state.auth_service.login(&body.email, &body.password).await?;

    Ok((
        jar.add(session_cookie(token)),
        Json(ApiResponse::new("Logged in successfully", user.into())),
    ))
}

/// Ends the session by clearing the cookie.
///
/// # Endpoint
///
/// `POST /api/auth/logout`
pub async fn logout_handler(jar: CookieJar) -> (CookieJar, Json<ApiResponse<()>>) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/").build());
    (jar, Json(ApiResponse::new("Logged out successfully", ())))
}

/// Returns the account behind the current session.
///
/// # Endpoint
///
/// `GET /api/auth/me`
///
/// # Response Codes
///
/// - **200 OK**
/// - **401 Unauthorized**: no valid session
/// - **404 Not Found**: account was deleted while the session was live
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<UserDto>>, AppError> {
    let user = state.auth_service.current_user(current_user.id).await?;
    Ok(Json(ApiResponse::new("Current user", user.into())))
}
