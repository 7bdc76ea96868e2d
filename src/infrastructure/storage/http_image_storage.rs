//! HTTP client for the external image host.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::infrastructure::storage::{ImageStorage, StoredImage};

/// Image host client speaking the provider's REST API.
///
/// Uploads go to `POST {base_url}/upload` as a multipart form with a `file`
/// part and a `folder` text part; the provider answers with the public URL
/// and a public id. Deletes go to `DELETE {base_url}/images/{id}`. Both
/// calls authenticate with a Bearer key.
pub struct HttpImageStorage {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
    public_id: String,
}

impl HttpImageStorage {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl ImageStorage for HttpImageStorage {
    async fn upload(&self, data: Bytes, folder: &str) -> Result<StoredImage, AppError> {
        let part = reqwest::multipart::Part::bytes(data.to_vec()).file_name("image");
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("folder", folder.to_string());

        let response = self
            .client
            .post(format!("{}/upload", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "image upload request failed");
                AppError::internal("Image upload failed", json!({}))
            })?;

        if !response.status().is_success() {
            tracing::error!(status = %response.status(), "image host rejected upload");
            return Err(AppError::internal(
                "Image upload failed",
                json!({ "status": response.status().as_u16() }),
            ));
        }

        let body: UploadResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "image host returned malformed upload response");
            AppError::internal("Image upload failed", json!({}))
        })?;

        Ok(StoredImage {
            url: body.url,
            storage_id: body.public_id,
        })
    }

    async fn delete(&self, storage_id: &str) -> Result<(), AppError> {
        let response = self
            .client
            .delete(format!("{}/images/{}", self.base_url, storage_id))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, storage_id, "image delete request failed");
                AppError::internal("Image delete failed", json!({}))
            })?;

        if !response.status().is_success() {
            tracing::error!(
                status = %response.status(),
                storage_id,
                "image host rejected delete"
            );
            return Err(AppError::internal(
                "Image delete failed",
                json!({ "status": response.status().as_u16() }),
            ));
        }

        Ok(())
    }
}
