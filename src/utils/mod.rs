//! Helper functions shared across the application layer.
//!
//! - [`password`] - Argon2 hashing and the password strength policy
//! - [`validation`] - account field validation

pub mod password;
pub mod validation;
