//! JWT authentication middleware for landlord-only endpoints.
//!
//! Tokens are issued by the external identity provider; this middleware
//! only verifies them. It extracts the bearer token from the Authorization
//! header, validates signature and expiry, optionally requires a role
//! claim, and injects an [`AuthContext`] into the request extensions for
//! handlers to extract.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::{ErrorForbidden, ErrorUnauthorized},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};
use uuid::Uuid;

/// Role required for property management endpoints
pub const LANDLORD_ROLE: &str = "landlord";

/// JWT claims issued by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id as a UUID string
    pub sub: String,
    /// User role
    pub role: String,
    /// Expiry, seconds since epoch
    pub exp: i64,
    /// Issued at, seconds since epoch
    pub iat: i64,
}

/// Authenticated user context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub role: String,
}

impl AuthContext {
    fn from_claims(claims: Claims) -> Result<Self, String> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| "Token subject is not a valid user id".to_string())?;
        Ok(Self {
            user_id,
            role: claims.role,
        })
    }
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let context = req.extensions().get::<AuthContext>().cloned();
        ready(context.ok_or_else(|| ErrorUnauthorized("Authentication required")))
    }
}

/// JWT authentication middleware factory
pub struct JwtAuth {
    jwt_secret: Option<String>,
    required_role: Option<&'static str>,
}

impl JwtAuth {
    /// Verify tokens without requiring any particular role
    pub fn new() -> Self {
        Self {
            jwt_secret: std::env::var("JWT_SECRET").ok(),
            required_role: None,
        }
    }

    /// Verify tokens and require the landlord role
    pub fn landlord() -> Self {
        Self {
            required_role: Some(LANDLORD_ROLE),
            ..Self::new()
        }
    }

    /// Use a specific secret instead of the JWT_SECRET environment variable
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }
}

impl Default for JwtAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            jwt_secret: self.jwt_secret.clone(),
            required_role: self.required_role,
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    jwt_secret: Option<String>,
    required_role: Option<&'static str>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let jwt_secret = self.jwt_secret.clone();
        let required_role = self.required_role;

        Box::pin(async move {
            let auth = (|| {
                let token = extract_bearer_token(&req)
                    .ok_or_else(|| ErrorUnauthorized("Missing or invalid Authorization header"))?;

                let secret = jwt_secret
                    .ok_or_else(|| ErrorUnauthorized("JWT verification not configured"))?;

                let context = verify_token(&token, &secret).map_err(ErrorUnauthorized)?;

                if let Some(role) = required_role {
                    if context.role != role {
                        return Err(ErrorForbidden("Insufficient role for this endpoint"));
                    }
                }

                Ok(context)
            })();

            match auth {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(err) => {
                    let response = err.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

fn verify_token(token: &str, secret: &str) -> Result<AuthContext, String> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| format!("Token verification failed: {e}"))?;

    AuthContext::from_claims(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn issue_token(secret: &str, user_id: Uuid, role: &str) -> String {
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
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = issue_token("test-secret", user_id, LANDLORD_ROLE);

        let context = verify_token(&token, "test-secret").unwrap();
        assert_eq!(context.user_id, user_id);
        assert_eq!(context.role, LANDLORD_ROLE);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue_token("test-secret", Uuid::new_v4(), LANDLORD_ROLE);
        assert!(verify_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            role: LANDLORD_ROLE.to_string(),
            exp: now - 120,
            iat: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(verify_token(&token, "test-secret").is_err());
    }

    #[test]
    fn test_non_uuid_subject_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            role: LANDLORD_ROLE.to_string(),
            exp: now + 3600,
            iat: now,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(verify_token(&token, "test-secret").is_err());
    }
}
