//! Business logic services for the application layer.

pub mod analytics_service;
pub mod auth_service;
pub mod club_service;
pub mod event_service;
pub mod user_service;

pub use analytics_service::{AnalyticsReport, AnalyticsService, ClubMetric, UserCensus};
pub use auth_service::{AuthService, Claims};
pub use club_service::{ClubDeletePolicy, ClubService, CreateClubInput, UpdateClubInput};
pub use event_service::{CreateEventInput, EventService, UpdateEventInput};
pub use user_service::UserService;
