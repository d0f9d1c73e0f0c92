//! Integration tests for the MySQL repositories
//!
//! These tests require a running MySQL instance with the schema applied.
//! Run with: cargo test -p rw_infra --test database_integration -- --ignored

use rw_infra::database::DatabasePool;
use rw_shared::config::DatabaseConfig;

fn test_config() -> DatabaseConfig {
    dotenvy::dotenv().ok();
    DatabaseConfig::from_env()
}

#[tokio::test]
#[ignore] // Requires MySQL server
async fn test_pool_connects() {
    let pool = DatabasePool::new(&test_config()).await;
    assert!(pool.is_ok(), "Failed to connect to MySQL");
}

#[tokio::test]
#[ignore] // Requires MySQL server
async fn test_health_check() {
    let pool = DatabasePool::new(&test_config()).await.unwrap();
    pool.health_check().await.unwrap();
    pool.close().await;
}

#[tokio::test]
#[ignore] // Requires MySQL server
async fn test_geography_listing() {
    use rw_core::repositories::GeographyRepository;
    use rw_infra::database::MySqlGeographyRepository;

    let pool = DatabasePool::new(&test_config()).await.unwrap();
    let repository = MySqlGeographyRepository::new(pool.inner());

    let regions = repository.list_regions().await.unwrap();
    // Seeded reference data is expected to be present
    assert!(!regions.is_empty(), "No regions seeded");

    let names: Vec<&str> = regions.iter().map(|r| r.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted, "Regions must come back ordered by name");

    pool.close().await;
}

#[tokio::test]
#[ignore] // Requires MySQL server
async fn test_search_unfiltered_pages() {
    use rw_core::domain::value_objects::search_filter::SearchFilter;
    use rw_core::repositories::PropertyRepository;
    use rw_infra::database::MySqlPropertyRepository;

    let pool = DatabasePool::new(&test_config()).await.unwrap();
    let repository = MySqlPropertyRepository::new(pool.inner());

    let page = repository.search(&SearchFilter::unconstrained()).await.unwrap();
    assert!(page.items.len() as u64 <= page.total_count);

    // Page must come back ordered by availability date, then id
    let keys: Vec<_> = page.items.iter().map(|p| (p.available_date, p.id)).collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);

    pool.close().await;
}
