//! Property search service.

mod service;
pub use service::SearchService;

#[cfg(test)]
mod tests;
