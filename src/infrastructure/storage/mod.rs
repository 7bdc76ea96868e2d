//! Object storage integration for hosted images.

pub mod http_image_storage;
pub mod image_storage;

pub use http_image_storage::HttpImageStorage;
pub use image_storage::{ImageStorage, StoredImage};

#[cfg(test)]
pub use image_storage::MockImageStorage;
