//! Repository layer: one zero-sized struct per table with async CRUD methods.

pub mod form_repo;
pub mod form_response_repo;
pub mod user_repo;

pub use form_repo::FormRepo;
pub use form_response_repo::FormResponseRepo;
pub use user_repo::UserRepo;
