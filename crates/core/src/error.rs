use crate::types::DbId;

/// Domain error taxonomy shared by every crate in the workspace.
///
/// Core functions classify failures into one of these variants and return
/// them; translation into transport-level responses happens at the API edge.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The form exists but is not currently accepting responses.
    #[error("Submission closed: {0}")]
    SubmissionClosed(String),

    /// An outbound collaborator (AI provider, file storage) failed.
    #[error("Upstream failure: {0}")]
    Upstream(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a not-found error keyed by a numeric database id.
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
