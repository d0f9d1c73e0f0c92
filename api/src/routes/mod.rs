//! HTTP route handlers

pub mod geography;
pub mod properties;
