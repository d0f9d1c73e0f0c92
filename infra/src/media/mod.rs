//! Media hosting integrations.
//!
//! Property images and videos live on an external asset host; this module
//! provides the HTTP-backed implementation of the core MediaStorage trait.

pub mod cloudinary;

pub use cloudinary::{CloudinaryConfig, CloudinaryMediaStorage};
