//! Media attached to a property listing.

use serde::{Deserialize, Serialize};

/// Kind of media asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    /// Storage-level string form ("image" / "video")
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }

    /// Parse the storage-level string form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "image" => Some(MediaType::Image),
            "video" => Some(MediaType::Video),
            _ => None,
        }
    }
}

/// A media asset hosted by the external storage collaborator.
///
/// Created when an upload succeeds; deleted individually or cascaded with
/// the owning property. `public_id` is the external host's handle, needed
/// to delete the asset again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMedia {
    pub id: i32,
    pub url: String,
    pub public_id: String,
    pub media_type: MediaType,
    pub property_id: i32,
}
