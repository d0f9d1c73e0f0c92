//! Geography repository trait for the Region -> District -> Suburb tree.
//!
//! Read-only: the hierarchy is seeded reference data, never mutated by the
//! application.

use async_trait::async_trait;

use crate::domain::entities::geography::{District, Region, Suburb};
use crate::errors::DomainError;

/// Repository trait for geographic hierarchy lookups
#[async_trait]
pub trait GeographyRepository: Send + Sync {
    /// All regions, ordered by name
    async fn list_regions(&self) -> Result<Vec<Region>, DomainError>;

    /// Districts belonging to a region, ordered by name
    async fn districts_in_region(&self, region_id: i32) -> Result<Vec<District>, DomainError>;

    /// Suburbs belonging to a district, ordered by name
    async fn suburbs_in_district(&self, district_id: i32) -> Result<Vec<Suburb>, DomainError>;

    /// Find a single suburb by id
    async fn find_suburb(&self, id: i32) -> Result<Option<Suburb>, DomainError>;
}
