//! Local-disk implementation of [`FileStore`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use formcraft_core::error::CoreError;
use formcraft_core::uploads::{stored_file_name, FileStore, StoredFile};

/// URL prefix under which stored files are served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Writes uploads into a single flat directory.
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<StoredFile, CoreError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| CoreError::Upstream(format!("File upload failed: {e}")))?;

        let filename = stored_file_name(original_name, chrono::Utc::now().timestamp_millis());
        tokio::fs::write(self.root.join(&filename), bytes)
            .await
            .map_err(|e| CoreError::Upstream(format!("File upload failed: {e}")))?;

        tracing::info!(%filename, size = bytes.len(), "Stored upload");

        Ok(StoredFile {
            url: format!("{UPLOADS_URL_PREFIX}/{filename}"),
            filename,
            original_name: original_name.to_string(),
            size: bytes.len(),
            storage: "local",
        })
    }
}
