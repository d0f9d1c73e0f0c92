//! Property service configuration.

/// Limits applied to listing mutations
#[derive(Debug, Clone)]
pub struct PropertyServiceConfig {
    /// Maximum number of images attached to one property
    pub max_images: usize,

    /// Maximum number of videos attached to one property
    pub max_videos: usize,
}

impl Default for PropertyServiceConfig {
    fn default() -> Self {
        Self {
            max_images: 20,
            max_videos: 1,
        }
    }
}
