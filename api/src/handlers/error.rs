//! Domain error to HTTP response mapping.
//!
//! Every route handler funnels its error path through
//! [`domain_error_response`] so status codes and response bodies stay
//! uniform across the API:
//!
//! - validation errors        -> 400
//! - missing credentials      -> 401
//! - missing resources        -> 404
//! - business rule conflicts  -> 409
//! - everything else          -> 500 (details logged, not leaked)

use actix_web::HttpResponse;
use tracing::{error, warn};

use rw_core::errors::DomainError;
use rw_shared::errors::{error_codes, ErrorResponse};

/// Convert a domain error into the canonical HTTP error response
pub fn domain_error_response(err: DomainError) -> HttpResponse {
    match err {
        DomainError::Validation(validation) => {
            warn!(error = %validation, "request rejected by validation");
            HttpResponse::BadRequest().json(ErrorResponse::new(
                error_codes::VALIDATION_ERROR,
                validation.to_string(),
            ))
        }
        DomainError::Unauthorized => HttpResponse::Unauthorized().json(ErrorResponse::new(
            error_codes::UNAUTHORIZED,
            "Authentication required",
        )),
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            error_codes::NOT_FOUND,
            format!("{resource} not found"),
        )),
        DomainError::BusinessRule { message } => {
            warn!(%message, "business rule violation");
            HttpResponse::Conflict().json(ErrorResponse::new(
                error_codes::BUSINESS_RULE_VIOLATION,
                message,
            ))
        }
        DomainError::MediaStorage { message } => {
            error!(%message, "media host failure");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::MEDIA_STORAGE_ERROR,
                "Media storage is temporarily unavailable",
            ))
        }
        DomainError::Internal { message } => {
            error!(%message, "internal error");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                "An internal error occurred",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use rw_core::errors::ValidationError;

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                DomainError::Validation(ValidationError::Negative {
                    field: "min_rent".to_string(),
                }),
                StatusCode::BAD_REQUEST,
            ),
            (DomainError::Unauthorized, StatusCode::UNAUTHORIZED),
            (DomainError::not_found("Property"), StatusCode::NOT_FOUND),
            (
                DomainError::BusinessRule {
                    message: "Cannot delete a property with active leases".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (
                DomainError::MediaStorage {
                    message: "upload failed".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                DomainError::internal("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(domain_error_response(err).status(), expected);
        }
    }
}
