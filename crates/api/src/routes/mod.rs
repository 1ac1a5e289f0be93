//! HTTP route handlers.

pub mod auth;
pub mod health;
pub mod openapi;
pub mod reservations;
pub mod rooms;
