//! Repository implementations for database operations.

pub mod client;
pub mod reservation;
pub mod room;
pub mod user;

pub use client::ClientRepository;
pub use reservation::ReservationRepository;
pub use room::RoomRepository;
pub use user::UserRepository;
