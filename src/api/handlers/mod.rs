//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod analytics;
pub mod auth;
pub mod clubs;
pub mod events;
pub mod health;
pub mod users;

pub use analytics::analytics_handler;
pub use auth::{login_handler, logout_handler, me_handler, register_handler};
pub use clubs::{
    create_club_handler, delete_club_handler, get_club_handler, list_clubs_handler,
    update_club_handler,
};
pub use events::{
    create_event_handler, delete_event_handler, get_event_handler, list_events_by_creator_handler,
    list_events_handler, update_event_handler,
};
pub use health::health_handler;
pub use users::{
    create_user_handler, delete_user_handler, list_users_handler, update_user_role_handler,
};
