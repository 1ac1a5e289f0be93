//! Domain layer for the Hotel Reef booking backend.
//!
//! This crate contains:
//! - Domain models (User, ClientIdentity, AvailableRoom, Reservation)
//! - Booking validation rules

pub mod models;
pub mod services;
