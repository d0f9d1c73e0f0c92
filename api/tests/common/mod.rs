//! Shared fixtures for the HTTP tests: an in-memory catalog, a fake media
//! host and JWT issuance helpers.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use rust_decimal::Decimal;
use uuid::Uuid;

use rw_api::app::AppState;
use rw_api::middleware::auth::Claims;
use rw_core::domain::entities::geography::{District, Region, Suburb};
use rw_core::domain::entities::property::{Property, PropertyType};
use rw_core::domain::value_objects::features::FeatureSet;
use rw_core::errors::DomainError;
use rw_core::repositories::{MockGeographyRepository, MockPropertyRepository};
use rw_core::services::property::PropertyServiceConfig;
use rw_core::services::{
    MediaStorage, MediaUpload, PropertyService, SearchService, StoredMedia,
};
use rw_core::MediaType;

pub const JWT_SECRET: &str = "test-secret";

/// Media host double that never fails and issues deterministic URLs
pub struct FakeMediaHost;

#[async_trait]
impl MediaStorage for FakeMediaHost {
    async fn upload_image(&self, upload: &MediaUpload) -> Result<StoredMedia, DomainError> {
        Ok(StoredMedia {
            url: format!("https://media.test/images/{}", upload.file_name),
            public_id: format!("images/{}", upload.file_name),
            media_type: MediaType::Image,
        })
    }

    async fn upload_video(&self, upload: &MediaUpload) -> Result<StoredMedia, DomainError> {
        Ok(StoredMedia {
            url: format!("https://media.test/videos/{}", upload.file_name),
            public_id: format!("videos/{}", upload.file_name),
            media_type: MediaType::Video,
        })
    }

    async fn delete(&self, _public_id: &str, _media_type: MediaType) -> Result<(), DomainError> {
        Ok(())
    }
}

pub type TestState = AppState<MockPropertyRepository, MockGeographyRepository, FakeMediaHost>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub geography: Arc<MockGeographyRepository>,
    pub properties: Arc<MockPropertyRepository>,
}

/// Build the service graph over empty in-memory repositories
pub async fn test_context() -> TestContext {
    std::env::set_var("JWT_SECRET", JWT_SECRET);

    let properties = Arc::new(MockPropertyRepository::new());
    let geography = Arc::new(MockGeographyRepository::new());
    let media = Arc::new(FakeMediaHost);

    let state = web::Data::new(AppState {
        search_service: Arc::new(SearchService::new(Arc::clone(&properties))),
        property_service: Arc::new(PropertyService::new(
            Arc::clone(&properties),
            Arc::clone(&geography),
            media,
            PropertyServiceConfig::default(),
        )),
    });

    TestContext {
        state,
        geography,
        properties,
    }
}

/// Seed the Auckland / Wellington fixture hierarchy
pub async fn seed_geography(ctx: &TestContext) {
    ctx.geography.insert_region(Region::new(1, "Auckland")).await;
    ctx.geography
        .insert_region(Region::new(2, "Wellington"))
        .await;
    ctx.geography
        .insert_district(District::new(10, "North Shore", 1))
        .await;
    ctx.geography
        .insert_district(District::new(20, "Wellington City", 2))
        .await;
    ctx.geography
        .insert_suburb(Suburb::new(100, "Takapuna", 10))
        .await;
    ctx.geography
        .insert_suburb(Suburb::new(200, "Te Aro", 20))
        .await;

    // The property catalog needs the district ancestry for region scopes
    ctx.properties
        .insert_district(District::new(10, "North Shore", 1))
        .await;
    ctx.properties
        .insert_district(District::new(20, "Wellington City", 2))
        .await;
}

/// A fully populated listing; availability is offset by the id for
/// deterministic ordering
pub fn listing(id: i32, owner: Uuid, suburb: Suburb, rent: i64, bedrooms: u32) -> Property {
    Property {
        id,
        user_id: owner,
        name: format!("Listing {id}"),
        address: format!("{id} Queen Street"),
        suburb,
        rent_amount: Decimal::new(rent * 100, 2),
        bedrooms,
        bathrooms: 1,
        parking_spaces: 1,
        property_type: PropertyType::House,
        features: FeatureSet::empty(),
        pets_allowed: false,
        available_date: NaiveDate::from_ymd_opt(2025, 7, 1)
            .unwrap()
            .checked_add_days(chrono::Days::new(id as u64))
            .unwrap(),
        created_at: Utc::now(),
        media: Vec::new(),
    }
}

pub fn takapuna() -> Suburb {
    Suburb::new(100, "Takapuna", 10)
}

pub fn te_aro() -> Suburb {
    Suburb::new(200, "Te Aro", 20)
}

/// Issue a signed token for the given role
pub fn issue_token(user_id: Uuid, role: &str) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        exp: now + 3600,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
