//! Shared domain types for the V-Fix platform backend.
//!
//! - [`error`] -- the `CoreError` taxonomy shared across crates.
//! - [`role`] -- closed role enumerations and the effective-role precedence table.
//! - [`types`] -- database id and timestamp aliases.

pub mod error;
pub mod role;
pub mod types;
