//! Search service: filter validation and query orchestration.
//!
//! The service validates and normalizes the incoming filter, then hands it
//! to the repository as one composed query. It is stateless and read-only;
//! concurrent searches are fully independent and each reflects whatever
//! committed state the store exposes at execution time.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::entities::property::Property;
use crate::domain::value_objects::search_filter::SearchFilter;
use crate::errors::{DomainResult, ValidationError};
use crate::repositories::PropertyRepository;
use rw_shared::types::PaginatedResponse;

/// Property search service
pub struct SearchService<P>
where
    P: PropertyRepository,
{
    repository: Arc<P>,
}

impl<P> SearchService<P>
where
    P: PropertyRepository,
{
    /// Create a new search service
    pub fn new(repository: Arc<P>) -> Self {
        Self { repository }
    }

    /// Execute a catalog search.
    ///
    /// Rejects malformed filters (negative rent bounds) before composing
    /// any query; clamps pagination into its valid range. Crossed rent
    /// bounds (`min > max`) are not an error and simply match nothing.
    pub async fn search(&self, filter: SearchFilter) -> DomainResult<PaginatedResponse<Property>> {
        let filter = Self::normalize(Self::validate(filter)?);

        debug!(
            page = filter.page.page,
            per_page = filter.page.per_page,
            constrained = filter.has_constraints(),
            "executing property search"
        );

        self.repository.search(&filter).await
    }

    fn validate(filter: SearchFilter) -> Result<SearchFilter, ValidationError> {
        if filter.min_rent.is_some_and(|r| r < Decimal::ZERO) {
            return Err(ValidationError::Negative {
                field: "min_rent".to_string(),
            });
        }
        if filter.max_rent.is_some_and(|r| r < Decimal::ZERO) {
            return Err(ValidationError::Negative {
                field: "max_rent".to_string(),
            });
        }
        Ok(filter)
    }

    fn normalize(mut filter: SearchFilter) -> SearchFilter {
        filter.page = filter.page.validate();
        // A blank keyword is no constraint at all
        if filter
            .keyword
            .as_ref()
            .is_some_and(|k| k.trim().is_empty())
        {
            filter.keyword = None;
        }
        filter
    }
}
