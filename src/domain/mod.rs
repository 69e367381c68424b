//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: domain types
//! - `wire.rs`: raw serde structs matching node requests and responses
//! - `client.rs`: sub-client with HTTP methods

pub mod admin;
pub mod order;
pub mod transaction;
