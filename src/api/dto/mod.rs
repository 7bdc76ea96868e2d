//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization; response
//! bodies are camelCase and wrapped in the [`envelope::ApiResponse`]
//! envelope.

pub mod analytics;
pub mod auth;
pub mod club;
pub mod envelope;
pub mod event;
pub mod health;
pub mod pagination;
pub mod user;
