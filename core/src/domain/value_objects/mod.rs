//! Value objects: immutable types defined by their value rather than identity

pub mod features;
pub mod search_filter;

pub use features::{FeatureSet, PropertyFeature};
pub use search_filter::{LocationScope, LocationSelection, SearchFilter};
