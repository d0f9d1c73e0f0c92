//! Domain-specific error types and error handling.

use thiserror::Error;

/// Input validation errors raised before any query is composed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid value for field: {field}")]
    InvalidValue { field: String },

    #[error("Value must not be negative: {field}")]
    Negative { field: String },

    #[error("Too many items for field: {field} (max: {max}, actual: {actual})")]
    TooMany {
        field: String,
        max: usize,
        actual: usize,
    },
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Business rule violation: {message}")]
    BusinessRule { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Media storage failure: {message}")]
    MediaStorage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DomainError {
    /// Shorthand for an internal error carrying a formatted message
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// Shorthand for a not-found error naming the missing resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_converts() {
        let err: DomainError = ValidationError::Negative {
            field: "min_rent".to_string(),
        }
        .into();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Value must not be negative: min_rent");
    }

    #[test]
    fn test_not_found_message() {
        let err = DomainError::not_found("Property");
        assert_eq!(err.to_string(), "Resource not found: Property");
    }
}
