//! Amenity feature flags and their bitmask encoding.
//!
//! Each amenity holds a fixed power-of-two bit so a set of amenities
//! collapses into a single integer via bitwise OR. The integer form is the
//! API and storage representation; inside the domain the set is handled
//! through [`FeatureSet`].
//!
//! Matching a requested feature filter is a subset test: a property
//! qualifies only if it has every requested feature, not merely an
//! overlapping one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single amenity flag with its fixed bit value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyFeature {
    Garage,
    EnsuiteBathroom,
    StudyArea,
    SeparateToilet,
}

impl PropertyFeature {
    /// All features, in ascending bit order
    pub const ALL: [PropertyFeature; 4] = [
        PropertyFeature::Garage,
        PropertyFeature::EnsuiteBathroom,
        PropertyFeature::StudyArea,
        PropertyFeature::SeparateToilet,
    ];

    /// The fixed power-of-two bit assigned to this feature
    pub fn bit(&self) -> u32 {
        match self {
            PropertyFeature::Garage => 1,
            PropertyFeature::EnsuiteBathroom => 1 << 1,
            PropertyFeature::StudyArea => 1 << 2,
            PropertyFeature::SeparateToilet => 1 << 3,
        }
    }
}

/// A set of amenity flags, stored in its encoded integer form.
///
/// `FeatureSet` itself never distinguishes "no constraint" from "empty":
/// that distinction belongs to `Option<FeatureSet>` at the filter edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSet(u32);

impl FeatureSet {
    /// The empty set (integer 0)
    pub fn empty() -> Self {
        FeatureSet(0)
    }

    /// Reconstruct a set from its encoded integer form.
    ///
    /// Bits outside the known feature range are preserved as-is; they take
    /// part in subset matching but are skipped when decoding to features.
    pub fn from_bits(bits: u32) -> Self {
        FeatureSet(bits)
    }

    /// Encode a collection of features into a set
    pub fn from_features(features: impl IntoIterator<Item = PropertyFeature>) -> Self {
        FeatureSet(features.into_iter().fold(0, |acc, f| acc | f.bit()))
    }

    /// The encoded integer form
    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Add a single feature
    pub fn with(self, feature: PropertyFeature) -> Self {
        FeatureSet(self.0 | feature.bit())
    }

    /// Whether a single feature bit is active
    pub fn contains(&self, feature: PropertyFeature) -> bool {
        self.0 & feature.bit() != 0
    }

    /// Subset test: every bit of `requested` must be present in `self`.
    ///
    /// This is the matching rule of the search engine. An empty request is
    /// vacuously satisfied.
    pub fn contains_all(&self, requested: FeatureSet) -> bool {
        self.0 & requested.0 == requested.0
    }

    /// Decode the known features, in ascending bit order
    pub fn features(&self) -> Vec<PropertyFeature> {
        PropertyFeature::ALL
            .into_iter()
            .filter(|f| self.contains(*f))
            .collect()
    }
}

impl FromIterator<PropertyFeature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = PropertyFeature>>(iter: I) -> Self {
        FeatureSet::from_features(iter)
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
