//! MySQL repository implementations

mod geography_repository_impl;
mod property_repository_impl;

pub use geography_repository_impl::MySqlGeographyRepository;
pub use property_repository_impl::MySqlPropertyRepository;
