//! Property management service (landlord-facing CRUD).

mod config;
mod service;

pub use config::PropertyServiceConfig;
pub use service::{CreateProperty, PropertyService, UpdateProperty};
