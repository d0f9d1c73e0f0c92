//! Cloudinary Media Storage Implementation
//!
//! This module provides asset hosting using the Cloudinary upload API.
//! It implements the MediaStorage trait for production media delivery.
//!
//! ## Features
//!
//! - Signed uploads (SHA-256 request signatures)
//! - Separate image and video resource types
//! - Deletion by public id
//! - Comprehensive error handling

use async_trait::async_trait;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;
use tracing::{debug, info, warn};

use rw_core::domain::entities::media::MediaType;
use rw_core::errors::DomainError;
use rw_core::services::{MediaStorage, MediaUpload, StoredMedia};

use crate::InfrastructureError;

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Cloudinary media storage configuration
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    /// Cloudinary cloud name
    pub cloud_name: String,
    /// API key
    pub api_key: String,
    /// API secret, used to sign requests
    pub api_secret: String,
    /// Folder assets are uploaded into
    pub folder: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl CloudinaryConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let cloud_name = std::env::var("CLOUDINARY_CLOUD_NAME").map_err(|_| {
            InfrastructureError::Config("CLOUDINARY_CLOUD_NAME not set".to_string())
        })?;
        let api_key = std::env::var("CLOUDINARY_API_KEY")
            .map_err(|_| InfrastructureError::Config("CLOUDINARY_API_KEY not set".to_string()))?;
        let api_secret = std::env::var("CLOUDINARY_API_SECRET").map_err(|_| {
            InfrastructureError::Config("CLOUDINARY_API_SECRET not set".to_string())
        })?;

        Ok(Self {
            cloud_name,
            api_key,
            api_secret,
            folder: std::env::var("CLOUDINARY_FOLDER")
                .unwrap_or_else(|_| "properties".to_string()),
            request_timeout_secs: std::env::var("CLOUDINARY_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        })
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

/// Cloudinary media storage implementation
pub struct CloudinaryMediaStorage {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryMediaStorage {
    /// Create a new Cloudinary media storage client
    pub fn new(config: CloudinaryConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                InfrastructureError::Config(format!("Failed to build HTTP client: {e}"))
            })?;

        info!(
            "Cloudinary media storage initialized for cloud: {}",
            config.cloud_name
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let config = CloudinaryConfig::from_env()?;
        Self::new(config)
    }

    /// SHA-256 request signature over the sorted parameter string
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut sorted: Vec<&(&str, &str)> = params.iter().collect();
        sorted.sort_by_key(|(name, _)| *name);
        let to_sign = sorted
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(self.config.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn resource_type(media_type: MediaType) -> &'static str {
        match media_type {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }

    async fn upload(
        &self,
        upload: &MediaUpload,
        media_type: MediaType,
    ) -> Result<StoredMedia, InfrastructureError> {
        let resource_type = Self::resource_type(media_type);
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = self.sign(&[
            ("folder", &self.config.folder),
            ("signature_algorithm", "sha256"),
            ("timestamp", &timestamp),
        ]);

        debug!(
            file_name = %upload.file_name,
            resource_type,
            size = upload.bytes.len(),
            "Uploading asset to Cloudinary"
        );

        let part = reqwest::multipart::Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)
            .map_err(|e| InfrastructureError::MediaHost(format!("Invalid content type: {e}")))?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone())
            .text("folder", self.config.folder.clone())
            .text("signature_algorithm", "sha256")
            .text("timestamp", timestamp)
            .text("signature", signature);

        let url = format!(
            "{API_BASE}/{}/{resource_type}/upload",
            self.config.cloud_name
        );
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| InfrastructureError::MediaHost(format!("Upload request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Cloudinary upload rejected");
            return Err(InfrastructureError::MediaHost(format!(
                "Upload rejected with status {status}: {body}"
            )));
        }

        let uploaded: UploadResponse = response.json().await.map_err(|e| {
            InfrastructureError::MediaHost(format!("Invalid upload response: {e}"))
        })?;

        info!(public_id = %uploaded.public_id, resource_type, "Asset uploaded");
        Ok(StoredMedia {
            url: uploaded.secure_url,
            public_id: uploaded.public_id,
            media_type,
        })
    }

    async fn destroy(
        &self,
        public_id: &str,
        media_type: MediaType,
    ) -> Result<(), InfrastructureError> {
        let resource_type = Self::resource_type(media_type);
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = self.sign(&[
            ("public_id", public_id),
            ("signature_algorithm", "sha256"),
            ("timestamp", &timestamp),
        ]);

        let form = reqwest::multipart::Form::new()
            .text("public_id", public_id.to_string())
            .text("api_key", self.config.api_key.clone())
            .text("signature_algorithm", "sha256")
            .text("timestamp", timestamp)
            .text("signature", signature);

        let url = format!(
            "{API_BASE}/{}/{resource_type}/destroy",
            self.config.cloud_name
        );
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| InfrastructureError::MediaHost(format!("Delete request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(InfrastructureError::MediaHost(format!(
                "Delete rejected with status {status}"
            )));
        }

        info!(public_id, resource_type, "Asset deleted");
        Ok(())
    }
}

#[async_trait]
impl MediaStorage for CloudinaryMediaStorage {
    async fn upload_image(&self, upload: &MediaUpload) -> Result<StoredMedia, DomainError> {
        Ok(self.upload(upload, MediaType::Image).await?)
    }

    async fn upload_video(&self, upload: &MediaUpload) -> Result<StoredMedia, DomainError> {
        Ok(self.upload(upload, MediaType::Video).await?)
    }

    async fn delete(&self, public_id: &str, media_type: MediaType) -> Result<(), DomainError> {
        Ok(self.destroy(public_id, media_type).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> CloudinaryConfig {
        CloudinaryConfig {
            cloud_name: "demo".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            folder: "properties".to_string(),
            request_timeout_secs: 60,
        }
    }

    #[test]
    fn signature_is_deterministic_and_order_independent() {
        let storage = CloudinaryMediaStorage::new(test_config()).unwrap();

        let a = storage.sign(&[("timestamp", "1700000000"), ("folder", "properties")]);
        let b = storage.sign(&[("folder", "properties"), ("timestamp", "1700000000")]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn signature_changes_with_parameters() {
        let storage = CloudinaryMediaStorage::new(test_config()).unwrap();

        let a = storage.sign(&[("timestamp", "1700000000")]);
        let b = storage.sign(&[("timestamp", "1700000001")]);
        assert_ne!(a, b);
    }

    #[test]
    fn resource_types_map_to_api_names() {
        assert_eq!(CloudinaryMediaStorage::resource_type(MediaType::Image), "image");
        assert_eq!(CloudinaryMediaStorage::resource_type(MediaType::Video), "video");
    }
}
