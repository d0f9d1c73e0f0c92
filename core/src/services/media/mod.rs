//! Media storage collaborator interface.
//!
//! The actual asset host (upload, URL issuance, deletion) is an external
//! service; this module only defines the seam the property service talks
//! through. The infrastructure crate provides the HTTP-backed
//! implementation.

use async_trait::async_trait;

use crate::domain::entities::media::MediaType;
use crate::errors::DomainError;

/// An asset submitted by a client, ready to be pushed to the media host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The host's record of a stored asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    /// Public URL served to clients
    pub url: String,
    /// Host-side handle, required to delete the asset again
    pub public_id: String,
    pub media_type: MediaType,
}

/// External media storage collaborator
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Upload an image, returning the hosted asset record
    async fn upload_image(&self, upload: &MediaUpload) -> Result<StoredMedia, DomainError>;

    /// Upload a video, returning the hosted asset record
    async fn upload_video(&self, upload: &MediaUpload) -> Result<StoredMedia, DomainError>;

    /// Delete a hosted asset by its public id
    async fn delete(&self, public_id: &str, media_type: MediaType) -> Result<(), DomainError>;
}
