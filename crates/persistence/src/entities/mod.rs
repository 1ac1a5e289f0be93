//! Database entity definitions.

pub mod client;
pub mod reservation;
pub mod room;
pub mod user;

pub use client::ClientEntity;
pub use reservation::{ReservationAmountsEntity, ReservationEntity};
pub use room::AvailableRoomEntity;
pub use user::UserEntity;
