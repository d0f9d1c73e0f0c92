//! Application state and factory.
//!
//! Wires the services into an actix-web application. The factory is
//! generic over the repository and media storage implementations so the
//! same route tree serves production (MySQL + Cloudinary) and the
//! in-memory doubles used by the HTTP tests.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use rw_core::repositories::{GeographyRepository, PropertyRepository};
use rw_core::services::{MediaStorage, PropertyService, SearchService};
use rw_shared::errors::{error_codes, ErrorResponse};

use crate::middleware::{create_cors, JwtAuth};
use crate::routes::{geography, properties};

/// Shared services handed to every request handler
pub struct AppState<P, G, M>
where
    P: PropertyRepository,
    G: GeographyRepository,
    M: MediaStorage,
{
    pub search_service: Arc<SearchService<P>>,
    pub property_service: Arc<PropertyService<P, G, M>>,
}

/// Create and configure the application with all routes and middleware
pub fn create_app<P, G, M>(
    app_state: web::Data<AppState<P, G, M>>,
    geography_repository: Arc<G>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    P: PropertyRepository + 'static,
    G: GeographyRepository + 'static,
    M: MediaStorage + 'static,
{
    let cors = create_cors();

    App::new()
        .app_data(app_state)
        .app_data(web::Data::new(geography_repository))
        .wrap(TracingLogger::default())
        .wrap(cors)
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/properties")
                        // Literal segments first so they are not captured by /{id}
                        .route("/search", web::get().to(properties::search::<P, G, M>))
                        .route(
                            "/mine",
                            web::get()
                                .to(properties::list_mine::<P, G, M>)
                                .wrap(JwtAuth::landlord()),
                        )
                        .route(
                            "/media/{media_id}",
                            web::delete()
                                .to(properties::delete_media::<P, G, M>)
                                .wrap(JwtAuth::landlord()),
                        )
                        .route(
                            "",
                            web::post()
                                .to(properties::create::<P, G, M>)
                                .wrap(JwtAuth::landlord()),
                        )
                        .route("/{id}", web::get().to(properties::get::<P, G, M>))
                        .route(
                            "/{id}",
                            web::put()
                                .to(properties::update::<P, G, M>)
                                .wrap(JwtAuth::landlord()),
                        )
                        .route(
                            "/{id}",
                            web::delete()
                                .to(properties::delete::<P, G, M>)
                                .wrap(JwtAuth::landlord()),
                        ),
                )
                .service(
                    web::scope("/geography")
                        .route("/regions", web::get().to(geography::list_regions::<G>))
                        .route(
                            "/regions/{region_id}/districts",
                            web::get().to(geography::list_districts::<G>),
                        )
                        .route(
                            "/districts/{district_id}/suburbs",
                            web::get().to(geography::list_suburbs::<G>),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "rentalwise-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
