//! Repository interfaces and in-memory mock implementations.
//!
//! The traits define the persistence contract consumed by the domain
//! services; concrete database implementations live in the infrastructure
//! crate. The mocks double as the reference implementation of the search
//! semantics and back the service tests.

pub mod geography;
pub mod property;

pub use geography::{GeographyRepository, MockGeographyRepository};
pub use property::{MockPropertyRepository, PropertyRepository};
