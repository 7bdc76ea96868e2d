//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - registration, login, and JWT sessions
//! - [`services::user_service::UserService`] - account administration
//! - [`services::club_service::ClubService`] - club management and image hosting
//! - [`services::event_service::EventService`] - event management and image hosting
//! - [`services::analytics_service::AnalyticsService`] - the directory analytics report

pub mod services;
