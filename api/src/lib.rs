//! HTTP API layer for the RentalWise marketplace.
//!
//! Exposes the public search and geography endpoints plus the
//! landlord-only property management endpoints over actix-web.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
