//! Custom Axum extractors.
//!
//! Extractors for authenticating callers and for turning request parsing
//! failures into [`ApiError`](crate::error::ApiError) responses.

pub mod rejection;
pub mod user_auth;

pub use rejection::{ApiJson, ApiPath, ApiQuery};
pub use user_auth::UserAuth;
