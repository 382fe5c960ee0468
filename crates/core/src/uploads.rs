//! Uploaded file naming and the storage collaborator interface.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::CoreError;
use crate::publishing::generate_share_token;

/// Default upload size limit (100 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Longest extension kept from the original file name.
const MAX_EXTENSION_LEN: usize = 16;

/// Metadata returned to the client after a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub filename: String,
    pub original_name: String,
    pub size: usize,
    /// Reference stored verbatim in `responseData` for file fields.
    pub url: String,
    pub storage: &'static str,
}

/// Backend that persists uploaded bytes and hands back a reference.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<StoredFile, CoreError>;
}

/// Extension of `original_name` including the dot, or `""`.
///
/// Only ASCII alphanumeric extensions are kept so the generated name is
/// always safe to use as a path segment.
pub fn file_extension(original_name: &str) -> String {
    let base = original_name.rsplit(['/', '\\']).next().unwrap_or("");
    match base.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            format!(".{}", ext.to_ascii_lowercase())
        }
        _ => String::new(),
    }
}

/// Generate a collision-resistant stored name: `<token>-<millis><.ext>`.
pub fn stored_file_name(original_name: &str, now_millis: i64) -> String {
    format!(
        "{}-{now_millis}{}",
        generate_share_token(),
        file_extension(original_name)
    )
}

/// Reject empty or oversized uploads.
pub fn validate_upload_size(size: usize, max_bytes: usize) -> Result<(), CoreError> {
    if size == 0 {
        return Err(CoreError::Validation("No file uploaded".into()));
    }
    if size > max_bytes {
        return Err(CoreError::Validation(format!(
            "File exceeds the maximum upload size of {max_bytes} bytes"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_rules() {
        assert_eq!(file_extension("cv.PDF"), ".pdf");
        assert_eq!(file_extension("archive.tar.gz"), ".gz");
        assert_eq!(file_extension("noext"), "");
        assert_eq!(file_extension(".bashrc"), "");
        assert_eq!(file_extension("evil.p/hp"), "");
        assert_eq!(file_extension("../../x.sh"), ".sh");
    }

    #[test]
    fn stored_name_shape() {
        let name = stored_file_name("photo.jpg", 1_700_000_000_000);
        assert!(name.ends_with("-1700000000000.jpg"));
        assert_eq!(name.len(), 10 + "-1700000000000.jpg".len());
    }

    #[test]
    fn size_limits() {
        assert!(validate_upload_size(0, 10).is_err());
        assert!(validate_upload_size(11, 10).is_err());
        assert!(validate_upload_size(10, 10).is_ok());
    }
}
