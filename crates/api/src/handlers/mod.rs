pub mod auth;
pub mod form;
pub mod form_response;
pub mod public;
pub mod suggestions;
pub mod uploads;
