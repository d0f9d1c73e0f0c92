//! Property search and management DTOs.
//!
//! Search parameters arrive as a flat query string; list-valued fields
//! (`suburb_ids`, `property_types`) are comma separated. Media uploads
//! arrive base64 encoded inside the JSON body.

use base64::Engine;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use rw_core::domain::entities::media::PropertyMedia;
use rw_core::domain::entities::property::{Property, PropertyType};
use rw_core::domain::value_objects::features::FeatureSet;
use rw_core::domain::value_objects::search_filter::{LocationSelection, SearchFilter};
use rw_core::errors::ValidationError;
use rw_core::services::property::{CreateProperty, UpdateProperty};
use rw_core::services::MediaUpload;
use rw_shared::types::Pagination;

use crate::dto::geography::SuburbResponse;

/// Query string parameters for GET /api/v1/properties/search
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub keyword: Option<String>,
    pub region_id: Option<i32>,
    pub district_id: Option<i32>,
    /// Comma separated suburb ids, e.g. `suburb_ids=3,7,9`
    pub suburb_ids: Option<String>,
    pub min_bedrooms: Option<u32>,
    pub min_bathrooms: Option<u32>,
    pub min_parking_spaces: Option<u32>,
    pub min_rent: Option<Decimal>,
    pub max_rent: Option<Decimal>,
    pub move_in_date: Option<NaiveDate>,
    /// Comma separated property type codes, e.g. `property_types=0,2`
    pub property_types: Option<String>,
    pub pets_allowed: Option<bool>,
    /// Required feature bitmask
    pub features: Option<u32>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl SearchQuery {
    /// Convert the raw query into a domain filter.
    ///
    /// Malformed list fields and unknown property type codes are rejected;
    /// out-of-range pagination is clamped later by the service.
    pub fn into_filter(self) -> Result<SearchFilter, ValidationError> {
        let suburb_ids = self
            .suburb_ids
            .as_deref()
            .map(|raw| parse_id_list(raw, "suburb_ids"))
            .transpose()?;

        let property_types = self
            .property_types
            .as_deref()
            .map(|raw| {
                parse_id_list(raw, "property_types")?
                    .into_iter()
                    .map(|code| {
                        PropertyType::from_code(code).ok_or_else(|| {
                            ValidationError::InvalidValue {
                                field: "property_types".to_string(),
                            }
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(SearchFilter {
            keyword: self.keyword,
            location: LocationSelection {
                region_id: self.region_id,
                district_id: self.district_id,
                suburb_ids,
            },
            min_bedrooms: self.min_bedrooms,
            min_bathrooms: self.min_bathrooms,
            min_parking_spaces: self.min_parking_spaces,
            min_rent: self.min_rent,
            max_rent: self.max_rent,
            move_in_date: self.move_in_date,
            property_types,
            pets_allowed: self.pets_allowed,
            features: self.features.map(FeatureSet::from_bits),
            page: Pagination {
                page: self.page_number.unwrap_or(1),
                per_page: self.page_size.unwrap_or(10),
            },
        })
    }
}

/// Query string parameters for GET /api/v1/properties/mine
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OwnerListQuery {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl OwnerListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page_number.unwrap_or(1), self.page_size.unwrap_or(10))
    }
}

fn parse_id_list(raw: &str, field: &str) -> Result<Vec<i32>, ValidationError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i32>().map_err(|_| ValidationError::InvalidValue {
                field: field.to_string(),
            })
        })
        .collect()
}

/// One media asset in a property response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaResponse {
    pub id: i32,
    pub url: String,
    pub media_type: String,
}

impl From<PropertyMedia> for MediaResponse {
    fn from(media: PropertyMedia) -> Self {
        Self {
            id: media.id,
            url: media.url,
            media_type: media.media_type.as_str().to_string(),
        }
    }
}

/// A property as returned by search and management endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyResponse {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub suburb: SuburbResponse,
    pub rent_amount: Decimal,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub parking_spaces: u32,
    pub property_type: i32,
    pub features: u32,
    pub pets_allowed: bool,
    pub available_date: NaiveDate,
    pub media: Vec<MediaResponse>,
}

impl From<Property> for PropertyResponse {
    fn from(property: Property) -> Self {
        Self {
            id: property.id,
            name: property.name,
            address: property.address,
            suburb: property.suburb.into(),
            rent_amount: property.rent_amount,
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            parking_spaces: property.parking_spaces,
            property_type: property.property_type.code(),
            features: property.features.bits(),
            pets_allowed: property.pets_allowed,
            available_date: property.available_date,
            media: property.media.into_iter().map(MediaResponse::from).collect(),
        }
    }
}

/// A base64-encoded media upload submitted inside a JSON body
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct MediaUploadRequest {
    #[validate(length(min = 1, max = 255))]
    pub file_name: String,
    #[validate(length(min = 1, max = 100))]
    pub content_type: String,
    /// Base64-encoded file contents
    pub data: String,
}

impl MediaUploadRequest {
    fn decode(self) -> Result<MediaUpload, ValidationError> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(self.data.as_bytes())
            .map_err(|_| ValidationError::InvalidValue {
                field: "data".to_string(),
            })?;
        Ok(MediaUpload {
            file_name: self.file_name,
            content_type: self.content_type,
            bytes,
        })
    }
}

/// Request body for POST /api/v1/properties
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreatePropertyRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 300))]
    pub address: String,
    pub suburb_id: i32,
    pub rent_amount: Decimal,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub parking_spaces: u32,
    pub property_type: i32,
    #[serde(default)]
    pub features: u32,
    pub pets_allowed: bool,
    pub available_date: NaiveDate,
    #[serde(default)]
    pub images: Vec<MediaUploadRequest>,
    pub video: Option<MediaUploadRequest>,
}

impl CreatePropertyRequest {
    pub fn into_input(self) -> Result<CreateProperty, ValidationError> {
        Ok(CreateProperty {
            name: self.name,
            address: self.address,
            suburb_id: self.suburb_id,
            rent_amount: self.rent_amount,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            parking_spaces: self.parking_spaces,
            property_type: parse_property_type(self.property_type)?,
            features: FeatureSet::from_bits(self.features),
            pets_allowed: self.pets_allowed,
            available_date: self.available_date,
            images: decode_all(self.images)?,
            video: self.video.map(MediaUploadRequest::decode).transpose()?,
        })
    }
}

/// Request body for PUT /api/v1/properties/{id}
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct UpdatePropertyRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 300))]
    pub address: String,
    pub suburb_id: i32,
    pub rent_amount: Decimal,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub parking_spaces: u32,
    pub property_type: i32,
    #[serde(default)]
    pub features: u32,
    pub pets_allowed: bool,
    pub available_date: NaiveDate,
    #[serde(default)]
    pub new_images: Vec<MediaUploadRequest>,
    pub new_video: Option<MediaUploadRequest>,
}

impl UpdatePropertyRequest {
    pub fn into_input(self) -> Result<UpdateProperty, ValidationError> {
        Ok(UpdateProperty {
            name: self.name,
            address: self.address,
            suburb_id: self.suburb_id,
            rent_amount: self.rent_amount,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            parking_spaces: self.parking_spaces,
            property_type: parse_property_type(self.property_type)?,
            features: FeatureSet::from_bits(self.features),
            pets_allowed: self.pets_allowed,
            available_date: self.available_date,
            new_images: decode_all(self.new_images)?,
            new_video: self.new_video.map(MediaUploadRequest::decode).transpose()?,
        })
    }
}

fn parse_property_type(code: i32) -> Result<PropertyType, ValidationError> {
    PropertyType::from_code(code).ok_or_else(|| ValidationError::InvalidValue {
        field: "property_type".to_string(),
    })
}

fn decode_all(uploads: Vec<MediaUploadRequest>) -> Result<Vec<MediaUpload>, ValidationError> {
    uploads
        .into_iter()
        .map(MediaUploadRequest::decode)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rw_core::domain::value_objects::search_filter::LocationScope;

    #[test]
    fn test_query_parses_comma_separated_lists() {
        let query = SearchQuery {
            suburb_ids: Some("3, 7,9".to_string()),
            property_types: Some("0,2".to_string()),
            ..Default::default()
        };
        let filter = query.into_filter().unwrap();

        assert_eq!(
            filter.location.scope(),
            LocationScope::Suburbs(vec![3, 7, 9])
        );
        assert_eq!(
            filter.property_types,
            Some(vec![PropertyType::Apartment, PropertyType::House])
        );
    }

    #[test]
    fn test_query_rejects_unknown_type_code() {
        let query = SearchQuery {
            property_types: Some("42".to_string()),
            ..Default::default()
        };
        assert!(query.into_filter().is_err());
    }

    #[test]
    fn test_query_rejects_malformed_suburb_list() {
        let query = SearchQuery {
            suburb_ids: Some("3,x".to_string()),
            ..Default::default()
        };
        assert!(query.into_filter().is_err());
    }

    #[test]
    fn test_query_defaults_pagination() {
        let filter = SearchQuery::default().into_filter().unwrap();
        assert_eq!(filter.page.page, 1);
        assert_eq!(filter.page.per_page, 10);
        assert!(!filter.has_constraints());
    }

    #[test]
    fn test_media_upload_decodes_base64() {
        let upload = MediaUploadRequest {
            file_name: "front.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            data: base64::engine::general_purpose::STANDARD.encode(b"fake bytes"),
        };
        let decoded = upload.decode().unwrap();
        assert_eq!(decoded.bytes, b"fake bytes");
    }

    #[test]
    fn test_media_upload_rejects_invalid_base64() {
        let upload = MediaUploadRequest {
            file_name: "front.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            data: "not base64!!!".to_string(),
        };
        assert!(upload.decode().is_err());
    }
}
