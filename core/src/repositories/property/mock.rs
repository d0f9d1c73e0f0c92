//! In-memory implementation of `PropertyRepository`.
//!
//! This is the reference implementation of the search semantics: an
//! explicit list of optional predicates ANDed over the catalog, count
//! before slicing, deterministic ordering. The database implementation in
//! the infrastructure crate compiles the same contract to SQL.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::geography::District;
use crate::domain::entities::lease::Lease;
use crate::domain::entities::media::PropertyMedia;
use crate::domain::entities::property::Property;
use crate::domain::value_objects::search_filter::{LocationScope, SearchFilter};
use crate::errors::DomainError;
use rw_shared::types::{PaginatedResponse, Pagination};

use super::r#trait::PropertyRepository;

#[derive(Default)]
struct Catalog {
    properties: HashMap<i32, Property>,
    leases: Vec<Lease>,
    /// District ancestry, needed to resolve region-level scopes
    districts: HashMap<i32, District>,
    next_property_id: i32,
    next_media_id: i32,
}

/// Mock property repository backed by in-memory maps
pub struct MockPropertyRepository {
    catalog: Arc<RwLock<Catalog>>,
}

impl MockPropertyRepository {
    /// Create an empty mock catalog
    pub fn new() -> Self {
        Self {
            catalog: Arc::new(RwLock::new(Catalog {
                next_property_id: 1,
                next_media_id: 1,
                ..Catalog::default()
            })),
        }
    }

    /// Seed a district so region-level scopes can be resolved
    pub async fn insert_district(&self, district: District) {
        let mut catalog = self.catalog.write().await;
        catalog.districts.insert(district.id, district);
    }

    /// Seed a lease for delete-guard tests
    pub async fn insert_lease(&self, lease: Lease) {
        let mut catalog = self.catalog.write().await;
        catalog.leases.push(lease);
    }

    /// Seed a property as-is, keeping the caller's ids
    pub async fn seed(&self, property: Property) {
        let mut catalog = self.catalog.write().await;
        catalog.next_property_id = catalog.next_property_id.max(property.id + 1);
        catalog.properties.insert(property.id, property);
    }

    fn matches(catalog: &Catalog, property: &Property, filter: &SearchFilter) -> bool {
        if let Some(keyword) = &filter.keyword {
            let needle = keyword.to_lowercase();
            let hit = property.name.to_lowercase().contains(&needle)
                || property.address.to_lowercase().contains(&needle)
                || property.suburb.name.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        match filter.location.scope() {
            LocationScope::Any => {}
            LocationScope::Suburbs(ids) => {
                if !ids.contains(&property.suburb.id) {
                    return false;
                }
            }
            LocationScope::District(district_id) => {
                if property.suburb.district_id != district_id {
                    return false;
                }
            }
            LocationScope::Region(region_id) => {
                let in_region = catalog
                    .districts
                    .get(&property.suburb.district_id)
                    .map(|d| d.region_id == region_id)
                    .unwrap_or(false);
                if !in_region {
                    return false;
                }
            }
        }

        if let Some(min) = filter.min_bedrooms {
            if property.bedrooms < min {
                return false;
            }
        }
        if let Some(min) = filter.min_bathrooms {
            if property.bathrooms < min {
                return false;
            }
        }
        if let Some(min) = filter.min_parking_spaces {
            if property.parking_spaces < min {
                return false;
            }
        }

        if let Some(min_rent) = filter.min_rent {
            if property.rent_amount < min_rent {
                return false;
            }
        }
        if let Some(max_rent) = filter.max_rent {
            if property.rent_amount > max_rent {
                return false;
            }
        }

        if let Some(pets) = filter.pets_allowed {
            if property.pets_allowed != pets {
                return false;
            }
        }

        if let Some(types) = &filter.property_types {
            if !types.contains(&property.property_type) {
                return false;
            }
        }

        if let Some(requested) = filter.features {
            if !property.features.contains_all(requested) {
                return false;
            }
        }

        if let Some(move_in) = filter.move_in_date {
            if property.available_date > move_in {
                return false;
            }
        }

        true
    }

    fn paginate(mut matches: Vec<Property>, page: Pagination) -> PaginatedResponse<Property> {
        matches.sort_by_key(|p| (p.available_date, p.id));
        let total = matches.len() as u64;
        let items = matches
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        PaginatedResponse::new(items, page, total)
    }
}

impl Default for MockPropertyRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropertyRepository for MockPropertyRepository {
    async fn search(
        &self,
        filter: &SearchFilter,
    ) -> Result<PaginatedResponse<Property>, DomainError> {
        let catalog = self.catalog.read().await;
        let matches: Vec<Property> = catalog
            .properties
            .values()
            .filter(|p| Self::matches(&catalog, p, filter))
            .cloned()
            .collect();
        Ok(Self::paginate(matches, filter.page))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Property>, DomainError> {
        let catalog = self.catalog.read().await;
        Ok(catalog.properties.get(&id).cloned())
    }

    async fn list_by_owner(
        &self,
        owner: Uuid,
        page: Pagination,
    ) -> Result<PaginatedResponse<Property>, DomainError> {
        let catalog = self.catalog.read().await;
        let mut owned: Vec<Property> = catalog
            .properties
            .values()
            .filter(|p| p.user_id == owner)
            .cloned()
            .collect();
        // Newest first, id as tie-break for determinism
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let total = owned.len() as u64;
        let items = owned
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PaginatedResponse::new(items, page, total))
    }

    async fn create(&self, mut property: Property) -> Result<Property, DomainError> {
        let mut catalog = self.catalog.write().await;
        property.id = catalog.next_property_id;
        catalog.next_property_id += 1;
        for media in &mut property.media {
            media.id = catalog.next_media_id;
            media.property_id = property.id;
            catalog.next_media_id += 1;
        }
        catalog.properties.insert(property.id, property.clone());
        Ok(property)
    }

    async fn update(&self, property: Property) -> Result<Property, DomainError> {
        let mut catalog = self.catalog.write().await;
        let existing = catalog
            .properties
            .get_mut(&property.id)
            .ok_or_else(|| DomainError::not_found("Property"))?;
        let media = existing.media.clone();
        *existing = Property { media, ..property };
        Ok(existing.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let mut catalog = self.catalog.write().await;
        Ok(catalog.properties.remove(&id).is_some())
    }

    async fn add_media(
        &self,
        property_id: i32,
        media: Vec<PropertyMedia>,
    ) -> Result<Vec<PropertyMedia>, DomainError> {
        let mut catalog = self.catalog.write().await;
        let next_ids: Vec<i32> = {
            let start = catalog.next_media_id;
            catalog.next_media_id += media.len() as i32;
            (start..start + media.len() as i32).collect()
        };
        let property = catalog
            .properties
            .get_mut(&property_id)
            .ok_or_else(|| DomainError::not_found("Property"))?;
        let mut attached = Vec::with_capacity(media.len());
        for (mut item, id) in media.into_iter().zip(next_ids) {
            item.id = id;
            item.property_id = property_id;
            property.media.push(item.clone());
            attached.push(item);
        }
        Ok(attached)
    }

    async fn find_media(&self, media_id: i32) -> Result<Option<PropertyMedia>, DomainError> {
        let catalog = self.catalog.read().await;
        Ok(catalog
            .properties
            .values()
            .flat_map(|p| p.media.iter())
            .find(|m| m.id == media_id)
            .cloned())
    }

    async fn delete_media(&self, media_id: i32) -> Result<bool, DomainError> {
        let mut catalog = self.catalog.write().await;
        for property in catalog.properties.values_mut() {
            if let Some(pos) = property.media.iter().position(|m| m.id == media_id) {
                property.media.remove(pos);
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn has_active_lease(&self, property_id: i32, on: NaiveDate) -> Result<bool, DomainError> {
        let catalog = self.catalog.read().await;
        Ok(catalog
            .leases
            .iter()
            .any(|l| l.property_id == property_id && l.is_active_on(on)))
    }
}
