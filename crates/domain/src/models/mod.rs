//! Domain models for Hotel Reef.

pub mod client;
pub mod reservation;
pub mod room;
pub mod user;

pub use client::ClientIdentity;
pub use reservation::{
    CreateReservationRequest, CreateReservationResponse, Reservation, ReservationAmounts,
    ReservationDraft, StayRange,
};
pub use room::AvailableRoom;
pub use user::{NewUser, User};
