//! Infrastructure layer: database repositories and external integrations.

pub mod persistence;
pub mod storage;
