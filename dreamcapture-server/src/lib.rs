//! dreamcapture-server: booking API backend
//!
//! Persists photography session bookings in PostgreSQL and exposes them
//! over HTTP. The library splits into:
//! - [`config`] - environment-driven startup configuration
//! - [`models`] - booking domain types with validation at construction
//! - [`db`] - connection pool and the bookings repository
//! - [`http`] - axum server, routes, and error-to-status mapping

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::AppConfig;
pub use db::{create_pool, BookingRepo, StoreError};
pub use http::{run_server, ServerConfig};
