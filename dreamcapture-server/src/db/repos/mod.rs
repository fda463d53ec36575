//! Repository implementations for database access

pub mod bookings;

pub use bookings::{BookingRepo, StoreError};
