//! Domain models with validation at construction
//!
//! Request input is validated before any SQL is issued. Invalid input
//! returns ValidationError, not panic; the database constraints remain
//! the final arbiter.

pub mod booking;
pub mod validation;

pub use booking::{Booking, NewBooking};
pub use validation::ValidationError;
