//! Geography lookup endpoints.
//!
//! Public, read-only views over the Region -> District -> Suburb tree,
//! used by clients to populate location pickers.

use actix_web::{web, HttpResponse};

use rw_core::repositories::GeographyRepository;

use crate::dto::{DistrictResponse, RegionResponse, SuburbResponse};
use crate::handlers::domain_error_response;

/// Handler for GET /api/v1/geography/regions
pub async fn list_regions<G>(geography: web::Data<std::sync::Arc<G>>) -> HttpResponse
where
    G: GeographyRepository + 'static,
{
    match geography.list_regions().await {
        Ok(regions) => HttpResponse::Ok().json(
            regions
                .into_iter()
                .map(RegionResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => domain_error_response(err),
    }
}

/// Handler for GET /api/v1/geography/regions/{region_id}/districts
pub async fn list_districts<G>(
    geography: web::Data<std::sync::Arc<G>>,
    path: web::Path<i32>,
) -> HttpResponse
where
    G: GeographyRepository + 'static,
{
    match geography.districts_in_region(path.into_inner()).await {
        Ok(districts) => HttpResponse::Ok().json(
            districts
                .into_iter()
                .map(DistrictResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => domain_error_response(err),
    }
}

/// Handler for GET /api/v1/geography/districts/{district_id}/suburbs
pub async fn list_suburbs<G>(
    geography: web::Data<std::sync::Arc<G>>,
    path: web::Path<i32>,
) -> HttpResponse
where
    G: GeographyRepository + 'static,
{
    match geography.suburbs_in_district(path.into_inner()).await {
        Ok(suburbs) => HttpResponse::Ok().json(
            suburbs
                .into_iter()
                .map(SuburbResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => domain_error_response(err),
    }
}
