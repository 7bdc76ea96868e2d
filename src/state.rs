//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{
    AnalyticsService, AuthService, ClubService, EventService, UserService,
};
use crate::infrastructure::persistence::{
    PgClubRepository, PgEventRepository, PgUserRepository,
};

/// Application state shared across the router.
///
/// Services are constructed once at startup with their repository and
/// storage handles and shared via `Arc`; cloning the state is cheap.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<PgUserRepository>>,
    pub user_service: Arc<UserService<PgUserRepository>>,
    pub club_service: Arc<ClubService<PgClubRepository, PgEventRepository>>,
    pub event_service: Arc<EventService<PgEventRepository, PgClubRepository>>,
    pub analytics_service: Arc<AnalyticsService<PgEventRepository, PgUserRepository>>,
    /// Upper bound for a single uploaded image, enforced during multipart
    /// parsing.
    pub max_upload_bytes: usize,
}
