//! MySQL implementation of the GeographyRepository trait.

use async_trait::async_trait;
use sqlx::MySqlPool;

use rw_core::domain::entities::geography::{District, Region, Suburb};
use rw_core::errors::DomainError;
use rw_core::repositories::GeographyRepository;

/// MySQL implementation of GeographyRepository
pub struct MySqlGeographyRepository {
    pool: MySqlPool,
}

impl MySqlGeographyRepository {
    /// Create a new MySQL geography repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GeographyRepository for MySqlGeographyRepository {
    async fn list_regions(&self) -> Result<Vec<Region>, DomainError> {
        sqlx::query_as::<_, (i32, String)>("SELECT id, name FROM regions ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map(|rows| {
                rows.into_iter()
                    .map(|(id, name)| Region { id, name })
                    .collect()
            })
            .map_err(|e| DomainError::internal(format!("Failed to list regions: {e}")))
    }

    async fn districts_in_region(&self, region_id: i32) -> Result<Vec<District>, DomainError> {
        sqlx::query_as::<_, (i32, String, i32)>(
            "SELECT id, name, region_id FROM districts WHERE region_id = ? ORDER BY name ASC",
        )
        .bind(region_id)
        .fetch_all(&self.pool)
        .await
        .map(|rows| {
            rows.into_iter()
                .map(|(id, name, region_id)| District {
                    id,
                    name,
                    region_id,
                })
                .collect()
        })
        .map_err(|e| DomainError::internal(format!("Failed to list districts: {e}")))
    }

    async fn suburbs_in_district(&self, district_id: i32) -> Result<Vec<Suburb>, DomainError> {
        sqlx::query_as::<_, (i32, String, i32)>(
            "SELECT id, name, district_id FROM suburbs WHERE district_id = ? ORDER BY name ASC",
        )
        .bind(district_id)
        .fetch_all(&self.pool)
        .await
        .map(|rows| {
            rows.into_iter()
                .map(|(id, name, district_id)| Suburb {
                    id,
                    name,
                    district_id,
                })
                .collect()
        })
        .map_err(|e| DomainError::internal(format!("Failed to list suburbs: {e}")))
    }

    async fn find_suburb(&self, id: i32) -> Result<Option<Suburb>, DomainError> {
        sqlx::query_as::<_, (i32, String, i32)>(
            "SELECT id, name, district_id FROM suburbs WHERE id = ? LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map(|row| {
            row.map(|(id, name, district_id)| Suburb {
                id,
                name,
                district_id,
            })
        })
        .map_err(|e| DomainError::internal(format!("Failed to find suburb: {e}")))
    }
}
