//! Publish gate, ownership checks, and shareable-link tokens.

use rand::Rng;

use crate::error::CoreError;
use crate::form::PublishStatus;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Length of a generated shareable token.
pub const SHARE_TOKEN_LENGTH: usize = 10;

/// URL-safe alphabet (64 symbols, 6 bits of entropy per character).
const SHARE_TOKEN_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

/// Whether a form with this status accepts public submissions.
pub fn can_submit(status: PublishStatus) -> bool {
    status == PublishStatus::Published
}

/// Fail with `SubmissionClosed` unless the form is published.
pub fn ensure_accepting_responses(status: PublishStatus) -> Result<(), CoreError> {
    if can_submit(status) {
        Ok(())
    } else {
        Err(CoreError::SubmissionClosed(
            "This form is not accepting responses".into(),
        ))
    }
}

/// Whether `requesting_user` owns the form.
pub fn can_access_private(owner_id: DbId, requesting_user: DbId) -> bool {
    owner_id == requesting_user
}

/// Fail with `Forbidden` unless `requesting_user` owns the form.
///
/// `action` completes the sentence "You do not have permission to ...".
pub fn ensure_owner(owner_id: DbId, requesting_user: DbId, action: &str) -> Result<(), CoreError> {
    if can_access_private(owner_id, requesting_user) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "You do not have permission to {action} this form"
        )))
    }
}

// ---------------------------------------------------------------------------
// Share tokens
// ---------------------------------------------------------------------------

/// Generate a random URL-safe token.
///
/// Uniqueness is probabilistic (60 bits); the store's unique index is the
/// backstop.
pub fn generate_share_token() -> String {
    let mut rng = rand::rng();
    (0..SHARE_TOKEN_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..SHARE_TOKEN_ALPHABET.len());
            SHARE_TOKEN_ALPHABET[idx] as char
        })
        .collect()
}

/// Resulting publish state of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishState {
    pub status: PublishStatus,
    pub shareable_url: Option<String>,
}

/// Transition into `published`.
///
/// A token is only minted when the form has never had one; an existing token
/// is reused so links handed out earlier keep working.
pub fn publish(current_token: Option<String>) -> PublishState {
    let token = current_token
        .filter(|t| !t.is_empty())
        .unwrap_or_else(generate_share_token);
    PublishState {
        status: PublishStatus::Published,
        shareable_url: Some(token),
    }
}

/// Transition back to `draft`. The token is kept.
pub fn unpublish(current_token: Option<String>) -> PublishState {
    PublishState {
        status: PublishStatus::Draft,
        shareable_url: current_token,
    }
}
