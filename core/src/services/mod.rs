//! Domain services orchestrating repositories and external collaborators

pub mod media;
pub mod property;
pub mod search;

pub use media::{MediaStorage, MediaUpload, StoredMedia};
pub use property::PropertyService;
pub use search::SearchService;
