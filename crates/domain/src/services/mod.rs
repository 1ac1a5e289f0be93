//! Domain services for Hotel Reef.
//!
//! Services contain business rules that operate on domain models without
//! touching storage.

pub mod booking;

pub use booking::{validate_availability, validate_reservation, AvailabilitySearch, BookingError};
