//! Shared utilities and common types for the RentalWise server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error types and response structures
//! - Pagination types for list endpoints

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{DatabaseConfig, Environment, ServerConfig};
pub use errors::{error_codes, ErrorResponse};
pub use types::{PaginatedResponse, Pagination};
