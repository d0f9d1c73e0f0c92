//! Property entity, the central aggregate of the rental catalog.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::geography::Suburb;
use crate::domain::entities::media::{MediaType, PropertyMedia};
use crate::domain::value_objects::features::FeatureSet;

/// Kind of dwelling a listing offers.
///
/// The integer codes are part of the API contract and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Apartment,
    CarPark,
    House,
    Townhouse,
    Unit,
}

impl PropertyType {
    /// All variants, in code order
    pub const ALL: [PropertyType; 5] = [
        PropertyType::Apartment,
        PropertyType::CarPark,
        PropertyType::House,
        PropertyType::Townhouse,
        PropertyType::Unit,
    ];

    /// Stable integer code used at the API and storage edges
    pub fn code(&self) -> i32 {
        match self {
            PropertyType::Apartment => 0,
            PropertyType::CarPark => 1,
            PropertyType::House => 2,
            PropertyType::Townhouse => 3,
            PropertyType::Unit => 4,
        }
    }

    /// Decode a stable integer code
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

/// A rental property listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Catalog identifier
    pub id: i32,

    /// Owning landlord's user id, issued by the identity collaborator
    pub user_id: Uuid,

    /// Listing title
    pub name: String,

    /// Street address
    pub address: String,

    /// The suburb this property sits in (always loaded with the property)
    pub suburb: Suburb,

    /// Weekly rent, fixed point with 2 decimal places
    pub rent_amount: Decimal,

    pub bedrooms: u32,
    pub bathrooms: u32,
    pub parking_spaces: u32,

    pub property_type: PropertyType,

    /// Amenity flags, bit-encoded
    pub features: FeatureSet,

    pub pets_allowed: bool,

    /// Earliest date a tenant can move in
    pub available_date: NaiveDate,

    pub created_at: DateTime<Utc>,

    /// Attached media, in upload order
    pub media: Vec<PropertyMedia>,
}

impl Property {
    /// Count of attached image assets
    pub fn image_count(&self) -> usize {
        self.media
            .iter()
            .filter(|m| m.media_type == MediaType::Image)
            .count()
    }

    /// Whether a video asset is already attached
    pub fn has_video(&self) -> bool {
        self.media.iter().any(|m| m.media_type == MediaType::Video)
    }
}
