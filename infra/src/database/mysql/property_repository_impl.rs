//! MySQL implementation of the PropertyRepository trait.
//!
//! The search contract is compiled to a single dynamically composed query:
//! each active filter predicate appends one `AND` clause, the total count
//! is taken over the filtered set first, then the page is fetched ordered
//! by `available_date, id`. Suburb and district rows are joined so keyword
//! and geography predicates can reach the hierarchy.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};
use std::collections::HashMap;
use uuid::Uuid;

use rw_core::domain::entities::geography::Suburb;
use rw_core::domain::entities::media::{MediaType, PropertyMedia};
use rw_core::domain::entities::property::{Property, PropertyType};
use rw_core::domain::value_objects::features::FeatureSet;
use rw_core::domain::value_objects::search_filter::{LocationScope, SearchFilter};
use rw_core::errors::DomainError;
use rw_core::repositories::PropertyRepository;
use rw_shared::types::{PaginatedResponse, Pagination};

const PROPERTY_COLUMNS: &str = "p.id, p.user_id, p.name, p.address, p.suburb_id, \
     s.name AS suburb_name, s.district_id, p.rent_amount, p.bedrooms, p.bathrooms, \
     p.parking_spaces, p.property_type, p.features, p.pets_allowed, p.available_date, \
     p.created_at";

const PROPERTY_JOINS: &str = " FROM properties p \
     JOIN suburbs s ON s.id = p.suburb_id \
     JOIN districts d ON d.id = s.district_id";

/// MySQL implementation of PropertyRepository
pub struct MySqlPropertyRepository {
    pool: MySqlPool,
}

impl MySqlPropertyRepository {
    /// Create a new MySQL property repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Append one `AND` clause per active filter predicate
    fn push_predicates(qb: &mut QueryBuilder<'_, MySql>, filter: &SearchFilter) {
        if let Some(keyword) = &filter.keyword {
            let pattern = format!("%{}%", escape_like(&keyword.to_lowercase()));
            qb.push(" AND (LOWER(p.name) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(p.address) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(s.name) LIKE ")
                .push_bind(pattern)
                .push(")");
        }

        match filter.location.scope() {
            LocationScope::Any => {}
            LocationScope::Suburbs(ids) => {
                qb.push(" AND p.suburb_id IN (");
                let mut sep = qb.separated(", ");
                for id in ids {
                    sep.push_bind(id);
                }
                qb.push(")");
            }
            LocationScope::District(district_id) => {
                qb.push(" AND s.district_id = ").push_bind(district_id);
            }
            LocationScope::Region(region_id) => {
                qb.push(" AND d.region_id = ").push_bind(region_id);
            }
        }

        if let Some(min) = filter.min_bedrooms {
            qb.push(" AND p.bedrooms >= ").push_bind(min);
        }
        if let Some(min) = filter.min_bathrooms {
            qb.push(" AND p.bathrooms >= ").push_bind(min);
        }
        if let Some(min) = filter.min_parking_spaces {
            qb.push(" AND p.parking_spaces >= ").push_bind(min);
        }

        if let Some(min_rent) = filter.min_rent {
            qb.push(" AND p.rent_amount >= ").push_bind(min_rent);
        }
        if let Some(max_rent) = filter.max_rent {
            qb.push(" AND p.rent_amount <= ").push_bind(max_rent);
        }

        if let Some(pets) = filter.pets_allowed {
            qb.push(" AND p.pets_allowed = ").push_bind(pets);
        }

        if let Some(types) = &filter.property_types {
            if !types.is_empty() {
                qb.push(" AND p.property_type IN (");
                let mut sep = qb.separated(", ");
                for t in types {
                    sep.push_bind(t.code());
                }
                qb.push(")");
            }
        }

        if let Some(features) = filter.features {
            // Subset test: the property must carry every requested bit
            qb.push(" AND (p.features & ")
                .push_bind(features.bits())
                .push(") = ")
                .push_bind(features.bits());
        }

        if let Some(move_in) = filter.move_in_date {
            qb.push(" AND p.available_date <= ").push_bind(move_in);
        }
    }

    async fn count_matches(&self, filter: &SearchFilter) -> Result<u64, DomainError> {
        let mut qb: QueryBuilder<'_, MySql> = QueryBuilder::new("SELECT COUNT(*)");
        qb.push(PROPERTY_JOINS).push(" WHERE 1 = 1");
        Self::push_predicates(&mut qb, filter);

        let count: i64 = qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to count matches: {e}")))?;
        Ok(count as u64)
    }

    async fn fetch_page(&self, filter: &SearchFilter) -> Result<Vec<Property>, DomainError> {
        let mut qb: QueryBuilder<'_, MySql> = QueryBuilder::new("SELECT ");
        qb.push(PROPERTY_COLUMNS)
            .push(PROPERTY_JOINS)
            .push(" WHERE 1 = 1");
        Self::push_predicates(&mut qb, filter);
        qb.push(" ORDER BY p.available_date ASC, p.id ASC LIMIT ")
            .push_bind(filter.page.limit_i64())
            .push(" OFFSET ")
            .push_bind(filter.page.offset_i64());

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to fetch page: {e}")))?;

        let mut properties = rows
            .iter()
            .map(row_to_property)
            .collect::<Result<Vec<_>, _>>()?;
        self.attach_media(&mut properties).await?;
        Ok(properties)
    }

    /// Load media rows for a page of properties in one query
    async fn attach_media(&self, properties: &mut [Property]) -> Result<(), DomainError> {
        if properties.is_empty() {
            return Ok(());
        }

        let mut qb: QueryBuilder<'_, MySql> = QueryBuilder::new(
            "SELECT id, url, public_id, media_type, property_id FROM property_media \
             WHERE property_id IN (",
        );
        let mut sep = qb.separated(", ");
        for property in properties.iter() {
            sep.push_bind(property.id);
        }
        qb.push(") ORDER BY id ASC");

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to fetch media: {e}")))?;

        let mut by_property: HashMap<i32, Vec<PropertyMedia>> = HashMap::new();
        for row in &rows {
            let media = row_to_media(row)?;
            by_property.entry(media.property_id).or_default().push(media);
        }
        for property in properties.iter_mut() {
            property.media = by_property.remove(&property.id).unwrap_or_default();
        }
        Ok(())
    }
}

#[async_trait]
impl PropertyRepository for MySqlPropertyRepository {
    async fn search(
        &self,
        filter: &SearchFilter,
    ) -> Result<PaginatedResponse<Property>, DomainError> {
        let total = self.count_matches(filter).await?;
        let items = if total == 0 {
            Vec::new()
        } else {
            self.fetch_page(filter).await?
        };
        Ok(PaginatedResponse::new(items, filter.page, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Property>, DomainError> {
        let query = format!(
            "SELECT {PROPERTY_COLUMNS}{PROPERTY_JOINS} WHERE p.id = ? LIMIT 1"
        );
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find property: {e}")))?;

        match row {
            Some(row) => {
                let mut properties = vec![row_to_property(&row)?];
                self.attach_media(&mut properties).await?;
                Ok(properties.pop())
            }
            None => Ok(None),
        }
    }

    async fn list_by_owner(
        &self,
        owner: Uuid,
        page: Pagination,
    ) -> Result<PaginatedResponse<Property>, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM properties WHERE user_id = ?")
            .bind(owner.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to count properties: {e}")))?;

        let query = format!(
            "SELECT {PROPERTY_COLUMNS}{PROPERTY_JOINS} WHERE p.user_id = ? \
             ORDER BY p.created_at DESC, p.id DESC LIMIT ? OFFSET ?"
        );
        let rows = sqlx::query(&query)
            .bind(owner.to_string())
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to list properties: {e}")))?;

        let mut properties = rows
            .iter()
            .map(row_to_property)
            .collect::<Result<Vec<_>, _>>()?;
        self.attach_media(&mut properties).await?;
        Ok(PaginatedResponse::new(properties, page, count as u64))
    }

    async fn create(&self, mut property: Property) -> Result<Property, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::internal(format!("Failed to open transaction: {e}")))?;

        let result = sqlx::query(
            "INSERT INTO properties (user_id, name, address, suburb_id, rent_amount, \
             bedrooms, bathrooms, parking_spaces, property_type, features, pets_allowed, \
             available_date, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(property.user_id.to_string())
        .bind(&property.name)
        .bind(&property.address)
        .bind(property.suburb.id)
        .bind(property.rent_amount)
        .bind(property.bedrooms)
        .bind(property.bathrooms)
        .bind(property.parking_spaces)
        .bind(property.property_type.code())
        .bind(property.features.bits())
        .bind(property.pets_allowed)
        .bind(property.available_date)
        .bind(property.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::internal(format!("Failed to insert property: {e}")))?;

        property.id = result.last_insert_id() as i32;

        for media in &mut property.media {
            let result = sqlx::query(
                "INSERT INTO property_media (url, public_id, media_type, property_id) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(&media.url)
            .bind(&media.public_id)
            .bind(media.media_type.as_str())
            .bind(property.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to insert media: {e}")))?;
            media.id = result.last_insert_id() as i32;
            media.property_id = property.id;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::internal(format!("Failed to commit: {e}")))?;
        Ok(property)
    }

    async fn update(&self, property: Property) -> Result<Property, DomainError> {
        let result = sqlx::query(
            "UPDATE properties SET name = ?, address = ?, suburb_id = ?, rent_amount = ?, \
             bedrooms = ?, bathrooms = ?, parking_spaces = ?, property_type = ?, \
             features = ?, pets_allowed = ?, available_date = ? WHERE id = ?",
        )
        .bind(&property.name)
        .bind(&property.address)
        .bind(property.suburb.id)
        .bind(property.rent_amount)
        .bind(property.bedrooms)
        .bind(property.bathrooms)
        .bind(property.parking_spaces)
        .bind(property.property_type.code())
        .bind(property.features.bits())
        .bind(property.pets_allowed)
        .bind(property.available_date)
        .bind(property.id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::internal(format!("Failed to update property: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Property"));
        }
        Ok(property)
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        // property_media rows cascade via the foreign key
        let result = sqlx::query("DELETE FROM properties WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to delete property: {e}")))?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_media(
        &self,
        property_id: i32,
        media: Vec<PropertyMedia>,
    ) -> Result<Vec<PropertyMedia>, DomainError> {
        let mut attached = Vec::with_capacity(media.len());
        for mut item in media {
            let result = sqlx::query(
                "INSERT INTO property_media (url, public_id, media_type, property_id) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(&item.url)
            .bind(&item.public_id)
            .bind(item.media_type.as_str())
            .bind(property_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to insert media: {e}")))?;
            item.id = result.last_insert_id() as i32;
            item.property_id = property_id;
            attached.push(item);
        }
        Ok(attached)
    }

    async fn find_media(&self, media_id: i32) -> Result<Option<PropertyMedia>, DomainError> {
        let row = sqlx::query(
            "SELECT id, url, public_id, media_type, property_id FROM property_media \
             WHERE id = ? LIMIT 1",
        )
        .bind(media_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::internal(format!("Failed to find media: {e}")))?;

        row.as_ref().map(row_to_media).transpose()
    }

    async fn delete_media(&self, media_id: i32) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM property_media WHERE id = ?")
            .bind(media_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to delete media: {e}")))?;
        Ok(result.rows_affected() > 0)
    }

    async fn has_active_lease(&self, property_id: i32, on: NaiveDate) -> Result<bool, DomainError> {
        let exists: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM leases WHERE property_id = ? AND end_date >= ?)",
        )
        .bind(property_id)
        .bind(on)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::internal(format!("Failed to check leases: {e}")))?;
        Ok(exists == 1)
    }
}

/// Escape LIKE wildcards in user keywords (MySQL default escape is `\`)
fn escape_like(keyword: &str) -> String {
    keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn row_to_property(row: &MySqlRow) -> Result<Property, DomainError> {
    let user_id: String = column(row, "user_id")?;
    let property_type_code: i32 = column(row, "property_type")?;
    let features_bits: u32 = column(row, "features")?;

    Ok(Property {
        id: column(row, "id")?,
        user_id: Uuid::parse_str(&user_id)
            .map_err(|e| DomainError::internal(format!("Invalid owner UUID: {e}")))?,
        name: column(row, "name")?,
        address: column(row, "address")?,
        suburb: Suburb {
            id: column(row, "suburb_id")?,
            name: column(row, "suburb_name")?,
            district_id: column(row, "district_id")?,
        },
        rent_amount: column::<Decimal>(row, "rent_amount")?,
        bedrooms: column::<u32>(row, "bedrooms")?,
        bathrooms: column::<u32>(row, "bathrooms")?,
        parking_spaces: column::<u32>(row, "parking_spaces")?,
        property_type: PropertyType::from_code(property_type_code)
            .ok_or_else(|| DomainError::internal(format!(
                "Unknown property type code: {property_type_code}"
            )))?,
        features: FeatureSet::from_bits(features_bits),
        pets_allowed: column(row, "pets_allowed")?,
        available_date: column::<NaiveDate>(row, "available_date")?,
        created_at: column::<DateTime<Utc>>(row, "created_at")?,
        media: Vec::new(),
    })
}

fn row_to_media(row: &MySqlRow) -> Result<PropertyMedia, DomainError> {
    let media_type: String = column(row, "media_type")?;
    Ok(PropertyMedia {
        id: column(row, "id")?,
        url: column(row, "url")?,
        public_id: column(row, "public_id")?,
        media_type: MediaType::parse(&media_type)
            .ok_or_else(|| DomainError::internal(format!("Unknown media type: {media_type}")))?,
        property_id: column(row, "property_id")?,
    })
}

fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
{
    row.try_get(name)
        .map_err(|e| DomainError::internal(format!("Failed to get {name}: {e}")))
}
