//! # API Shared
//!
//! Shared utilities and definitions for MaligNet APIs.
//!
//! Contains:
//! - JSON wire types (`wire` module) for the REST API and its HTTP clients
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` (server side) and `malignet-core` (the HTTP summary provider).

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
