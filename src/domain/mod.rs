//! Domain layer: business entities and repository traits.

pub mod entities;
pub mod repositories;
