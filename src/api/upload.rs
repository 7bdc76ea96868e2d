//! Multipart form parsing for the image-bearing endpoints.

use axum::extract::multipart::Multipart;
use bytes::Bytes;
use serde_json::json;
use std::collections::HashMap;

use crate::error::AppError;

/// Parsed multipart form: text fields by name plus an optional `image` part.
///
/// Field order is not significant; unknown fields are ignored. The image is
/// content-sniffed, so a renamed executable does not pass as a PNG.
#[derive(Debug, Default)]
pub struct UploadForm {
    texts: HashMap<String, String>,
    image: Option<Bytes>,
}

impl UploadForm {
    /// Drains the multipart stream into a form.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] on a malformed stream, an oversized or
    ///   non-image `image` part, or a non-UTF-8 text part
    pub async fn parse(mut multipart: Multipart, max_image_bytes: usize) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            AppError::bad_request("Malformed multipart request", json!({ "reason": e.to_string() }))
        })? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == "image" {
                let data = field.bytes().await.map_err(|e| {
                    AppError::bad_request(
                        "Failed to read image field",
                        json!({ "reason": e.to_string() }),
                    )
                })?;
                form.image = Some(check_image(data, max_image_bytes)?);
            } else {
                let text = field.text().await.map_err(|e| {
                    AppError::bad_request(
                        "Form fields must be UTF-8 text",
                        json!({ "field": name, "reason": e.to_string() }),
                    )
                })?;
                form.texts.insert(name, text);
            }
        }

        Ok(form)
    }

    /// Looks up an optional text field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts.get(name).map(String::as_str)
    }

    /// Looks up a mandatory text field.
    pub fn require_text(&self, name: &str) -> Result<&str, AppError> {
        self.text(name).ok_or_else(|| {
            AppError::bad_request(
                format!("Missing required field '{name}'"),
                json!({ "field": name }),
            )
        })
    }

    /// Takes the optional image part.
    pub fn take_image(&mut self) -> Option<Bytes> {
        self.image.take()
    }

    /// Takes the mandatory image part.
    pub fn require_image(&mut self) -> Result<Bytes, AppError> {
        self.take_image().ok_or_else(|| {
            AppError::bad_request("An image file is required", json!({ "field": "image" }))
        })
    }
}

/// Size limit and magic-byte sniff for an uploaded image.
fn check_image(data: Bytes, max_image_bytes: usize) -> Result<Bytes, AppError> {
    if data.len() > max_image_bytes {
        return Err(AppError::bad_request(
            "Image exceeds the maximum upload size",
            json!({ "field": "image", "maxBytes": max_image_bytes, "actualBytes": data.len() }),
        ));
    }

    let sniffed = infer::get(&data)
        .map(|kind| kind.mime_type().to_string())
        .unwrap_or_default();

    let is_image = sniffed
        .parse::<mime::Mime>()
        .map(|m| m.type_() == mime::IMAGE)
        .unwrap_or(false);

    if !is_image {
        return Err(AppError::bad_request(
            "Uploaded file is not an image",
            json!({ "field": "image", "detectedType": sniffed }),
        ));
    }

    Ok(data)
}
