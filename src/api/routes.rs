//! API route configuration.
//!
//! Read endpoints are public; mutations require a session, and the account
//! administration endpoints additionally require an admin role.

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};

use crate::api::handlers::{
    analytics_handler, create_club_handler, create_event_handler, create_user_handler,
    delete_club_handler, delete_event_handler, delete_user_handler, get_club_handler,
    get_event_handler, list_clubs_handler, list_events_by_creator_handler, list_events_handler,
    list_users_handler, login_handler, logout_handler, me_handler, register_handler,
    update_club_handler, update_event_handler, update_user_role_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;

/// All `/api` routes.
///
/// # Endpoints
///
/// - `POST   /auth/register`, `POST /auth/login`, `POST /auth/logout` - public
/// - `GET    /auth/me`                     - session required
/// - `GET    /clubs`, `GET /clubs/{id}`    - public
/// - `POST   /clubs`, `PATCH|DELETE /clubs/{id}` - session required
/// - `GET    /events`, `GET /events/{id}`, `GET /events/creator/{createdBy}` - public
/// - `POST   /events`, `PATCH|DELETE /events/{id}` - session required
/// - `GET    /users`, `PATCH /users/{id}/role`, `DELETE /users/{id}`,
///   `POST /users/create-user`             - admin session required
/// - `GET    /analytics`                   - public
pub fn api_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler))
        .route("/clubs", get(list_clubs_handler))
        .route("/clubs/{id}", get(get_club_handler))
        .route("/events", get(list_events_handler))
        .route("/events/{id}", get(get_event_handler))
        .route("/events/creator/{createdBy}", get(list_events_by_creator_handler))
        .route("/analytics", get(analytics_handler));

    let session = Router::new()
        .route("/auth/me", get(me_handler))
        .route("/clubs", post(create_club_handler))
        .route(
            "/clubs/{id}",
            patch(update_club_handler).delete(delete_club_handler),
        )
        .route("/events", post(create_event_handler))
        .route(
            "/events/{id}",
            patch(update_event_handler).delete(delete_event_handler),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    // require_admin runs inside the session layer; route_layer ordering
    // makes the later layer the outer one.
    let admin = Router::new()
        .route("/users", get(list_users_handler))
        .route("/users/{id}/role", patch(update_user_role_handler))
        .route("/users/{id}", delete(delete_user_handler))
        .route("/users/create-user", post(create_user_handler))
        .route_layer(middleware::from_fn(auth::require_admin))
        .route_layer(middleware::from_fn_with_state(state, auth::layer));

    public.merge(session).merge(admin)
}
