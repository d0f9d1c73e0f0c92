//! In-memory implementation of `GeographyRepository` for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::geography::{District, Region, Suburb};
use crate::errors::DomainError;

use super::r#trait::GeographyRepository;

#[derive(Default)]
struct Tree {
    regions: HashMap<i32, Region>,
    districts: HashMap<i32, District>,
    suburbs: HashMap<i32, Suburb>,
}

/// Mock geography repository seeded from (region, district, suburb) rows
pub struct MockGeographyRepository {
    tree: Arc<RwLock<Tree>>,
}

impl MockGeographyRepository {
    pub fn new() -> Self {
        Self {
            tree: Arc::new(RwLock::new(Tree::default())),
        }
    }

    pub async fn insert_region(&self, region: Region) {
        self.tree.write().await.regions.insert(region.id, region);
    }

    pub async fn insert_district(&self, district: District) {
        self.tree
            .write()
            .await
            .districts
            .insert(district.id, district);
    }

    pub async fn insert_suburb(&self, suburb: Suburb) {
        self.tree.write().await.suburbs.insert(suburb.id, suburb);
    }
}

impl Default for MockGeographyRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GeographyRepository for MockGeographyRepository {
    async fn list_regions(&self) -> Result<Vec<Region>, DomainError> {
        let tree = self.tree.read().await;
        let mut regions: Vec<Region> = tree.regions.values().cloned().collect();
        regions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(regions)
    }

    async fn districts_in_region(&self, region_id: i32) -> Result<Vec<District>, DomainError> {
        let tree = self.tree.read().await;
        let mut districts: Vec<District> = tree
            .districts
            .values()
            .filter(|d| d.region_id == region_id)
            .cloned()
            .collect();
        districts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(districts)
    }

    async fn suburbs_in_district(&self, district_id: i32) -> Result<Vec<Suburb>, DomainError> {
        let tree = self.tree.read().await;
        let mut suburbs: Vec<Suburb> = tree
            .suburbs
            .values()
            .filter(|s| s.district_id == district_id)
            .cloned()
            .collect();
        suburbs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(suburbs)
    }

    async fn find_suburb(&self, id: i32) -> Result<Option<Suburb>, DomainError> {
        let tree = self.tree.read().await;
        Ok(tree.suburbs.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hierarchy_lookups() {
        let repo = MockGeographyRepository::new();
        repo.insert_region(Region::new(1, "Auckland")).await;
        repo.insert_district(District::new(10, "North Shore", 1)).await;
        repo.insert_district(District::new(11, "Waitakere", 1)).await;
        repo.insert_suburb(Suburb::new(100, "Takapuna", 10)).await;
        repo.insert_suburb(Suburb::new(101, "Albany", 10)).await;

        let regions = repo.list_regions().await.unwrap();
        assert_eq!(regions.len(), 1);

        let districts = repo.districts_in_region(1).await.unwrap();
        assert_eq!(
            districts.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
            vec!["North Shore", "Waitakere"]
        );

        let suburbs = repo.suburbs_in_district(10).await.unwrap();
        assert_eq!(
            suburbs.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            vec!["Albany", "Takapuna"]
        );

        assert!(repo.find_suburb(100).await.unwrap().is_some());
        assert!(repo.find_suburb(999).await.unwrap().is_none());
    }
}
