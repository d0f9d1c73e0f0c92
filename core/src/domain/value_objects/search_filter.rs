//! Search filter value object and location scope resolution.
//!
//! Every predicate in [`SearchFilter`] is optional; an absent field means
//! "no constraint at that level". The active predicates are ANDed together
//! by the repository executing the search.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entities::property::PropertyType;
use crate::domain::value_objects::features::FeatureSet;
use rw_shared::types::Pagination;

/// Location selectors as submitted by the client.
///
/// The three levels are not validated for mutual consistency; resolution
/// picks the narrowest one provided (see [`LocationSelection::scope`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSelection {
    pub region_id: Option<i32>,
    pub district_id: Option<i32>,
    pub suburb_ids: Option<Vec<i32>>,
}

/// The effective geographic constraint after precedence resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationScope {
    /// No geographic constraint
    Any,
    /// Property's suburb must be one of these
    Suburbs(Vec<i32>),
    /// Property's suburb must belong to this district
    District(i32),
    /// Property's suburb's district must belong to this region
    Region(i32),
}

impl LocationSelection {
    /// Resolve the selection into a single effective scope.
    ///
    /// Priority order: a non-empty suburb set wins, else the district, else
    /// the region. Suburbs are the deepest selection a client can make, so
    /// once they are present the coarser selectors are ignored even when
    /// inconsistent with them. An empty suburb list is treated like an
    /// absent one and falls through to the coarser levels.
    pub fn scope(&self) -> LocationScope {
        if let Some(suburbs) = &self.suburb_ids {
            if !suburbs.is_empty() {
                return LocationScope::Suburbs(suburbs.clone());
            }
        }
        if let Some(district_id) = self.district_id {
            return LocationScope::District(district_id);
        }
        if let Some(region_id) = self.region_id {
            return LocationScope::Region(region_id);
        }
        LocationScope::Any
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.scope(), LocationScope::Any)
    }
}

/// A multi-dimensional property search request.
///
/// Built from the transport DTO by the API layer; consumed by
/// `SearchService` and the repository implementations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Case-insensitive substring matched against the property name,
    /// address, or suburb name
    pub keyword: Option<String>,

    /// Geographic selectors
    #[serde(default)]
    pub location: LocationSelection,

    /// Inclusive lower bounds on room and parking counts
    pub min_bedrooms: Option<u32>,
    pub min_bathrooms: Option<u32>,
    pub min_parking_spaces: Option<u32>,

    /// Inclusive rent bounds
    pub min_rent: Option<Decimal>,
    pub max_rent: Option<Decimal>,

    /// The property must already be available on this date
    pub move_in_date: Option<NaiveDate>,

    /// Property must be one of these types
    pub property_types: Option<Vec<PropertyType>>,

    /// Exact match when set
    pub pets_allowed: Option<bool>,

    /// The property must have every feature in this set
    pub features: Option<FeatureSet>,

    /// Page selection (already clamped by `Pagination`)
    #[serde(default)]
    pub page: Pagination,
}

impl SearchFilter {
    /// A filter with no constraints and default pagination
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Whether any predicate beyond pagination is active
    pub fn has_constraints(&self) -> bool {
        self.keyword.is_some()
            || !self.location.is_empty()
            || self.min_bedrooms.is_some()
            || self.min_bathrooms.is_some()
            || self.min_parking_spaces.is_some()
            || self.min_rent.is_some()
            || self.max_rent.is_some()
            || self.move_in_date.is_some()
            || self.property_types.is_some()
            || self.pets_allowed.is_some()
            || self.features.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suburbs_win_over_district_and_region() {
        let selection = LocationSelection {
            region_id: Some(1),
            district_id: Some(2),
            suburb_ids: Some(vec![5, 6]),
        };
        assert_eq!(selection.scope(), LocationScope::Suburbs(vec![5, 6]));
    }

    #[test]
    fn test_district_wins_over_region() {
        let selection = LocationSelection {
            region_id: Some(1),
            district_id: Some(2),
            suburb_ids: None,
        };
        assert_eq!(selection.scope(), LocationScope::District(2));
    }

    #[test]
    fn test_region_alone() {
        let selection = LocationSelection {
            region_id: Some(1),
            district_id: None,
            suburb_ids: None,
        };
        assert_eq!(selection.scope(), LocationScope::Region(1));
    }

    #[test]
    fn test_empty_suburb_list_falls_through() {
        let selection = LocationSelection {
            region_id: Some(1),
            district_id: None,
            suburb_ids: Some(vec![]),
        };
        assert_eq!(selection.scope(), LocationScope::Region(1));
    }

    #[test]
    fn test_no_selection_means_any() {
        assert_eq!(LocationSelection::default().scope(), LocationScope::Any);
        assert!(LocationSelection::default().is_empty());
    }

    #[test]
    fn test_unconstrained_filter() {
        let filter = SearchFilter::unconstrained();
        assert!(!filter.has_constraints());
        assert_eq!(filter.page, Pagination::default());

        let filter = SearchFilter {
            pets_allowed: Some(true),
            ..SearchFilter::unconstrained()
        };
        assert!(filter.has_constraints());
    }
}
