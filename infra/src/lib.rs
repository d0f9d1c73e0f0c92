//! # Infrastructure Layer
//!
//! Concrete implementations of the core repository and collaborator traits:
//!
//! - **Database**: MySQL implementations using SQLx
//! - **Media**: Cloudinary-backed media storage over HTTP

use thiserror::Error;

pub mod database;
pub mod media;

/// Infrastructure-level errors, converted to domain errors at the boundary
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Media host error: {0}")]
    MediaHost(String),
}

impl From<InfrastructureError> for rw_core::errors::DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::MediaHost(message) => {
                rw_core::errors::DomainError::MediaStorage { message }
            }
            other => rw_core::errors::DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}
