//! # Filesystem-backed blob storage
//!
//! [`FileBlobStorage`] is a [`BlobStorage`] implementation that writes uploads
//! under a base directory and hands back a URL under a public prefix. The server
//! uses it behind the blob upload endpoint and serves the directory statically.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── profileImages/
//! │   └── <uid>/<timestamp>      # raw upload bytes
//! └── noteImages/
//!     └── <uid>/<timestamp>
//! ```
//!
//! Upload paths are relative and may not contain `..` or empty segments.

use std::path::PathBuf;

use crate::backend::BlobStorage;
use crate::error::BackendError;

/// Filesystem-backed blob storage.
#[derive(Clone, Debug)]
pub struct FileBlobStorage {
    base: PathBuf,
    public_url: String,
}

impl FileBlobStorage {
    /// `public_url` is the URL prefix the base directory is served under.
    pub fn new(base: PathBuf, public_url: impl Into<String>) -> Self {
        Self {
            base,
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn blob_path(&self, path: &str) -> Result<PathBuf, BackendError> {
        let mut full = self.base.clone();
        for segment in path.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(BackendError::Rejected(format!("invalid blob path: {path}")));
            }
            full.push(segment);
        }
        Ok(full)
    }
}

impl BlobStorage for FileBlobStorage {
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> Result<String, BackendError> {
        let full = self.blob_path(path)?;
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).map_err(|e| BackendError::unavailable(e.to_string()))?;
        }
        std::fs::write(&full, bytes).map_err(|e| BackendError::unavailable(e.to_string()))?;
        tracing::info!("Stored blob {}", path);
        Ok(format!("{}/{}", self.public_url, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_writes_file_and_returns_url() {
        let dir = std::env::temp_dir().join(format!("notesapp_blobs_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let storage = FileBlobStorage::new(dir.clone(), "http://localhost:8080/blobs/");
        let url = storage
            .upload("profileImages/u1/20261018T120000000Z", vec![1, 2, 3])
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:8080/blobs/profileImages/u1/20261018T120000000Z");
        let stored = std::fs::read(dir.join("profileImages/u1/20261018T120000000Z")).unwrap();
        assert_eq!(stored, vec![1, 2, 3]);

        // Cleanup
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_rejects_escaping_paths() {
        let storage = FileBlobStorage::new(std::env::temp_dir(), "/blobs");
        for bad in ["../etc/passwd", "a//b", "/abs", "a/./b"] {
            let err = storage.upload(bad, vec![]).await.unwrap_err();
            assert!(matches!(err, BackendError::Rejected(_)), "{bad}");
        }
    }
}
