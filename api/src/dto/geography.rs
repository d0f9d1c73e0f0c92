//! Geography lookup response DTOs

use serde::{Deserialize, Serialize};

use rw_core::domain::entities::geography::{District, Region, Suburb};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionResponse {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistrictResponse {
    pub id: i32,
    pub name: String,
    pub region_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuburbResponse {
    pub id: i32,
    pub name: String,
    pub district_id: i32,
}

impl From<Region> for RegionResponse {
    fn from(region: Region) -> Self {
        Self {
            id: region.id,
            name: region.name,
        }
    }
}

impl From<District> for DistrictResponse {
    fn from(district: District) -> Self {
        Self {
            id: district.id,
            name: district.name,
            region_id: district.region_id,
        }
    }
}

impl From<Suburb> for SuburbResponse {
    fn from(suburb: Suburb) -> Self {
        Self {
            id: suburb.id,
            name: suburb.name,
            district_id: suburb.district_id,
        }
    }
}
