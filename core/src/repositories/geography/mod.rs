//! Geographic hierarchy repository module.

mod r#trait;
pub use r#trait::GeographyRepository;

mod mock;
pub use mock::MockGeographyRepository;
