//! Application services that orchestrate repositories.

pub mod auth;

pub use auth::{AuthError, AuthService, LoginResult, Registration};
