//! Shared utilities for the Hotel Reef backend.
//!
//! This crate provides functionality used across the other crates:
//! - Bearer token issuance and verification (JWT)
//! - Password hashing with Argon2id
//! - Input parsing and validation helpers

pub mod jwt;
pub mod password;
pub mod validation;
