//! Success response envelope.

use serde::Serialize;

/// Envelope shared by every successful response:
/// `{"success": true, "message": ..., "data": ...}`.
///
/// The failure counterpart lives in [`crate::error`].
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}
