//! Form builder domain logic.
//!
//! Everything here is pure (no database or network access) so it can be
//! shared by the API server, repositories, and provider integrations.

pub mod analytics;
pub mod answer;
pub mod error;
pub mod form;
pub mod publishing;
pub mod submission;
pub mod suggestions;
pub mod types;
pub mod uploads;
