//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing, verification, and strength checks.
//! - [`jwt`] -- JWT access-token generation/validation and reset-token helpers.
//! - [`device`] -- device metadata extraction from request headers.

pub mod device;
pub mod jwt;
pub mod password;
