//! Property repository trait defining the interface for catalog persistence.
//!
//! Implementations must be able to execute the composed search filter as a
//! single count-then-page query; the search engine performs no partial
//! failure recovery, so any storage error aborts the whole operation.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::entities::media::PropertyMedia;
use crate::domain::entities::property::Property;
use crate::domain::value_objects::search_filter::SearchFilter;
use crate::errors::DomainError;
use rw_shared::types::{PaginatedResponse, Pagination};

/// Repository trait for Property aggregate persistence.
///
/// The search contract: all active filter predicates are ANDed, the total
/// count is taken over the fully filtered set before slicing, and pages are
/// ordered by `available_date` ascending with `id` ascending as tie-break.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Execute a filtered, paginated catalog search.
    ///
    /// No matches is not an error: the result is an empty page with a zero
    /// total count.
    async fn search(
        &self,
        filter: &SearchFilter,
    ) -> Result<PaginatedResponse<Property>, DomainError>;

    /// Find a property with its media by id
    async fn find_by_id(&self, id: i32) -> Result<Option<Property>, DomainError>;

    /// List a landlord's properties, newest first
    async fn list_by_owner(
        &self,
        owner: Uuid,
        page: Pagination,
    ) -> Result<PaginatedResponse<Property>, DomainError>;

    /// Persist a new property together with its media list.
    ///
    /// Incoming ids (property and media) are placeholders; the returned
    /// entity carries the assigned ones.
    async fn create(&self, property: Property) -> Result<Property, DomainError>;

    /// Update a property's scalar fields. Media attachments are managed
    /// through [`PropertyRepository::add_media`] and
    /// [`PropertyRepository::delete_media`].
    async fn update(&self, property: Property) -> Result<Property, DomainError>;

    /// Delete a property and cascade its media rows.
    ///
    /// Returns `false` when no such property exists.
    async fn delete(&self, id: i32) -> Result<bool, DomainError>;

    /// Attach media rows to an existing property, returning them with
    /// assigned ids
    async fn add_media(
        &self,
        property_id: i32,
        media: Vec<PropertyMedia>,
    ) -> Result<Vec<PropertyMedia>, DomainError>;

    /// Find a single media row by id
    async fn find_media(&self, media_id: i32) -> Result<Option<PropertyMedia>, DomainError>;

    /// Delete a single media row. Returns `false` when it does not exist.
    async fn delete_media(&self, media_id: i32) -> Result<bool, DomainError>;

    /// Whether the property has a lease whose end date is on or after `on`
    async fn has_active_lease(&self, property_id: i32, on: NaiveDate) -> Result<bool, DomainError>;
}
