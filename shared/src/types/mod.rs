//! Common type definitions shared across the server crates

pub mod pagination;

pub use pagination::{PaginatedResponse, Pagination};
