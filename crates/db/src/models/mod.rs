//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` / plain DTOs for inserts and updates

pub mod form;
pub mod form_response;
pub mod user;
