//! Landlord property management endpoints.
//!
//! All handlers here sit behind the landlord JWT middleware; the
//! authenticated user id comes from the [`AuthContext`] extractor.
//! Ownership failures surface as 404, so callers cannot probe for the
//! existence of other landlords' listings.

use actix_web::{web, HttpResponse};
use validator::Validate;

use rw_core::errors::DomainError;
use rw_core::repositories::{GeographyRepository, PropertyRepository};
use rw_core::services::MediaStorage;
use rw_shared::errors::{error_codes, ErrorResponse};

use crate::app::AppState;
use crate::dto::{CreatePropertyRequest, OwnerListQuery, PropertyResponse, UpdatePropertyRequest};
use crate::handlers::domain_error_response;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/properties/mine
pub async fn list_mine<P, G, M>(
    state: web::Data<AppState<P, G, M>>,
    auth: AuthContext,
    query: web::Query<OwnerListQuery>,
) -> HttpResponse
where
    P: PropertyRepository + 'static,
    G: GeographyRepository + 'static,
    M: MediaStorage + 'static,
{
    match state
        .property_service
        .list_for_owner(auth.user_id, query.pagination())
        .await
    {
        Ok(page) => HttpResponse::Ok().json(page.map(PropertyResponse::from)),
        Err(err) => domain_error_response(err),
    }
}

/// Handler for POST /api/v1/properties
pub async fn create<P, G, M>(
    state: web::Data<AppState<P, G, M>>,
    auth: AuthContext,
    request: web::Json<CreatePropertyRequest>,
) -> HttpResponse
where
    P: PropertyRepository + 'static,
    G: GeographyRepository + 'static,
    M: MediaStorage + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_failure(errors);
    }
    let input = match request.into_inner().into_input() {
        Ok(input) => input,
        Err(err) => return domain_error_response(DomainError::Validation(err)),
    };

    match state.property_service.create(auth.user_id, input).await {
        Ok(property) => HttpResponse::Created().json(PropertyResponse::from(property)),
        Err(err) => domain_error_response(err),
    }
}

/// Handler for PUT /api/v1/properties/{id}
pub async fn update<P, G, M>(
    state: web::Data<AppState<P, G, M>>,
    auth: AuthContext,
    path: web::Path<i32>,
    request: web::Json<UpdatePropertyRequest>,
) -> HttpResponse
where
    P: PropertyRepository + 'static,
    G: GeographyRepository + 'static,
    M: MediaStorage + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_failure(errors);
    }
    let input = match request.into_inner().into_input() {
        Ok(input) => input,
        Err(err) => return domain_error_response(DomainError::Validation(err)),
    };

    match state
        .property_service
        .update(auth.user_id, path.into_inner(), input)
        .await
    {
        Ok(property) => HttpResponse::Ok().json(PropertyResponse::from(property)),
        Err(err) => domain_error_response(err),
    }
}

/// Handler for DELETE /api/v1/properties/{id}
pub async fn delete<P, G, M>(
    state: web::Data<AppState<P, G, M>>,
    auth: AuthContext,
    path: web::Path<i32>,
) -> HttpResponse
where
    P: PropertyRepository + 'static,
    G: GeographyRepository + 'static,
    M: MediaStorage + 'static,
{
    match state
        .property_service
        .delete(auth.user_id, path.into_inner())
        .await
    {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => domain_error_response(err),
    }
}

/// Handler for DELETE /api/v1/properties/media/{media_id}
pub async fn delete_media<P, G, M>(
    state: web::Data<AppState<P, G, M>>,
    auth: AuthContext,
    path: web::Path<i32>,
) -> HttpResponse
where
    P: PropertyRepository + 'static,
    G: GeographyRepository + 'static,
    M: MediaStorage + 'static,
{
    match state
        .property_service
        .delete_media(auth.user_id, path.into_inner())
        .await
    {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => domain_error_response(err),
    }
}

fn validation_failure(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data")
            .add_detail("errors", errors.to_string()),
    )
}
