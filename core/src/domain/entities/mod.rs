//! Domain entities for the RentalWise catalog

pub mod geography;
pub mod lease;
pub mod media;
pub mod property;

pub use geography::{District, Region, Suburb};
pub use lease::Lease;
pub use media::{MediaType, PropertyMedia};
pub use property::{Property, PropertyType};
