//! Database layer - connection pool and the bookings repository
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections) - no Arc<Mutex<Connection>>
//! - Every operation is a single parameterized statement; per-statement
//!   atomicity only, no application-level locking
//! - Rely on DB constraints, classify violations - no check-then-insert

pub mod pool;
pub mod repos;

pub use pool::{create_pool, probe};
pub use repos::{BookingRepo, StoreError};
