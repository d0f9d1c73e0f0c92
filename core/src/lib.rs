//! # RentalWise Core
//!
//! Core business logic and domain layer for the RentalWise backend.
//! This crate contains domain entities, the property search engine,
//! repository interfaces, and error types that form the foundation of
//! the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    District, Lease, MediaType, Property, PropertyMedia, PropertyType, Region, Suburb,
};
pub use domain::value_objects::{
    FeatureSet, LocationScope, LocationSelection, PropertyFeature, SearchFilter,
};
pub use errors::{DomainError, DomainResult, ValidationError};
pub use repositories::{
    GeographyRepository, MockGeographyRepository, MockPropertyRepository, PropertyRepository,
};
pub use services::{
    MediaStorage, MediaUpload, PropertyService, SearchService, StoredMedia,
};
