//! Route handlers organized by resource

pub mod bookings;
pub mod health;
