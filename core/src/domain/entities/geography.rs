//! Geographic hierarchy entities: Region -> District -> Suburb.
//!
//! The hierarchy is a strict tree: every district belongs to exactly one
//! region and every suburb to exactly one district. Properties reference
//! exactly one suburb.

use serde::{Deserialize, Serialize};

/// Top level of the geographic hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: i32,
    pub name: String,
}

/// Second level, owned by a region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub id: i32,
    pub name: String,
    pub region_id: i32,
}

/// Leaf level, owned by a district; the unit properties are scoped to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suburb {
    pub id: i32,
    pub name: String,
    pub district_id: i32,
}

impl Region {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl District {
    pub fn new(id: i32, name: impl Into<String>, region_id: i32) -> Self {
        Self {
            id,
            name: name.into(),
            region_id,
        }
    }
}

impl Suburb {
    pub fn new(id: i32, name: impl Into<String>, district_id: i32) -> Self {
        Self {
            id,
            name: name.into(),
            district_id,
        }
    }
}
