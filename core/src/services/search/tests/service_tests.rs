//! Search service tests: validation, normalization and delegation.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::entities::geography::Suburb;
use crate::domain::entities::property::{Property, PropertyType};
use crate::domain::value_objects::features::FeatureSet;
use crate::domain::value_objects::search_filter::SearchFilter;
use crate::errors::{DomainError, ValidationError};
use crate::repositories::MockPropertyRepository;
use crate::services::search::SearchService;
use rw_shared::types::Pagination;

fn sample_property(id: i32, available: NaiveDate) -> Property {
    Property {
        id,
        user_id: Uuid::new_v4(),
        name: format!("Listing {id}"),
        address: format!("{id} Example Road"),
        suburb: Suburb::new(10, "Ponsonby", 1),
        rent_amount: Decimal::new(50000, 2),
        bedrooms: 2,
        bathrooms: 1,
        parking_spaces: 0,
        property_type: PropertyType::Apartment,
        features: FeatureSet::empty(),
        pets_allowed: false,
        available_date: available,
        created_at: Utc::now(),
        media: Vec::new(),
    }
}

async fn service_with(n: i32) -> SearchService<MockPropertyRepository> {
    let repo = Arc::new(MockPropertyRepository::new());
    for id in 1..=n {
        let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
            + chrono::Duration::days(id as i64);
        repo.seed(sample_property(id, date)).await;
    }
    SearchService::new(repo)
}

#[tokio::test]
async fn negative_rent_bound_is_rejected_before_querying() {
    let service = service_with(1).await;
    let filter = SearchFilter {
        min_rent: Some(Decimal::new(-100, 2)),
        ..SearchFilter::unconstrained()
    };
    let err = service.search(filter).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::Negative { ref field }) if field == "min_rent"
    ));

    let filter = SearchFilter {
        max_rent: Some(Decimal::NEGATIVE_ONE),
        ..SearchFilter::unconstrained()
    };
    assert!(service.search(filter).await.is_err());
}

#[tokio::test]
async fn out_of_range_pagination_is_clamped() {
    let service = service_with(3).await;
    let filter = SearchFilter {
        page: Pagination {
            page: 0,
            per_page: 1000,
        },
        ..SearchFilter::unconstrained()
    };
    let result = service.search(filter).await.unwrap();
    assert_eq!(result.page, 1);
    assert_eq!(result.per_page, 100);
    assert_eq!(result.total_count, 3);
}

#[tokio::test]
async fn blank_keyword_is_dropped() {
    let service = service_with(2).await;
    let filter = SearchFilter {
        keyword: Some("   ".to_string()),
        ..SearchFilter::unconstrained()
    };
    let result = service.search(filter).await.unwrap();
    assert_eq!(result.total_count, 2);
}

#[tokio::test]
async fn no_match_is_an_empty_result_not_an_error() {
    let service = service_with(2).await;
    let filter = SearchFilter {
        keyword: Some("nonexistent".to_string()),
        ..SearchFilter::unconstrained()
    };
    let result = service.search(filter).await.unwrap();
    assert!(result.is_empty());
    assert_eq!(result.total_count, 0);
}

#[tokio::test]
async fn results_are_ordered_and_paged() {
    let service = service_with(5).await;
    let filter = SearchFilter {
        page: Pagination::new(2, 2),
        ..SearchFilter::unconstrained()
    };
    let result = service.search(filter).await.unwrap();
    assert_eq!(
        result.items.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![3, 4]
    );
    assert_eq!(result.total_pages, 3);
}
