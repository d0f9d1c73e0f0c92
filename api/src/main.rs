//! RentalWise API server entry point.
//!
//! Boots the tracing stack, loads configuration from the environment,
//! connects the MySQL pool and the media host client, then serves the
//! HTTP API.

use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rw_api::app::{create_app, AppState};
use rw_core::services::property::PropertyServiceConfig;
use rw_core::services::{PropertyService, SearchService};
use rw_infra::database::{DatabasePool, MySqlGeographyRepository, MySqlPropertyRepository};
use rw_infra::media::CloudinaryMediaStorage;
use rw_shared::config::{DatabaseConfig, ServerConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("starting RentalWise API server");

    let server_config = ServerConfig::from_env();
    let database_config = DatabaseConfig::from_env();

    let pool = DatabasePool::new(&database_config)
        .await
        .context("failed to create database pool")?;
    pool.health_check()
        .await
        .context("database health check failed")?;

    let property_repository = Arc::new(MySqlPropertyRepository::new(pool.inner()));
    let geography_repository = Arc::new(MySqlGeographyRepository::new(pool.inner()));
    let media_storage = Arc::new(
        CloudinaryMediaStorage::from_env().context("failed to configure media storage")?,
    );

    let search_service = Arc::new(SearchService::new(Arc::clone(&property_repository)));
    let property_service = Arc::new(PropertyService::new(
        Arc::clone(&property_repository),
        Arc::clone(&geography_repository),
        media_storage,
        PropertyServiceConfig::default(),
    ));

    let app_state = web::Data::new(AppState {
        search_service,
        property_service,
    });

    let bind_address = server_config.bind_address();
    info!(%bind_address, "binding HTTP server");

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), Arc::clone(&geography_repository))
    })
    .bind(&bind_address)
    .with_context(|| format!("failed to bind {bind_address}"))?;

    if server_config.workers > 0 {
        server = server.workers(server_config.workers);
    }

    server.run().await?;
    Ok(())
}
