//! Public catalog endpoints: search and single-property lookup

use actix_web::{web, HttpResponse};

use rw_core::errors::DomainError;
use rw_core::repositories::{GeographyRepository, PropertyRepository};
use rw_core::services::MediaStorage;

use crate::app::AppState;
use crate::dto::{PropertyResponse, SearchQuery};
use crate::handlers::domain_error_response;

/// Handler for GET /api/v1/properties/search
///
/// All filter parameters are optional; active ones are combined with AND.
/// Results are ordered by availability date, then id, and paginated with
/// `page_number`/`page_size`.
pub async fn search<P, G, M>(
    state: web::Data<AppState<P, G, M>>,
    query: web::Query<SearchQuery>,
) -> HttpResponse
where
    P: PropertyRepository + 'static,
    G: GeographyRepository + 'static,
    M: MediaStorage + 'static,
{
    let filter = match query.into_inner().into_filter() {
        Ok(filter) => filter,
        Err(err) => return domain_error_response(DomainError::Validation(err)),
    };

    match state.search_service.search(filter).await {
        Ok(page) => HttpResponse::Ok().json(page.map(PropertyResponse::from)),
        Err(err) => domain_error_response(err),
    }
}

/// Handler for GET /api/v1/properties/{id}
pub async fn get<P, G, M>(
    state: web::Data<AppState<P, G, M>>,
    path: web::Path<i32>,
) -> HttpResponse
where
    P: PropertyRepository + 'static,
    G: GeographyRepository + 'static,
    M: MediaStorage + 'static,
{
    match state.property_service.get(path.into_inner()).await {
        Ok(property) => HttpResponse::Ok().json(PropertyResponse::from(property)),
        Err(err) => domain_error_response(err),
    }
}
