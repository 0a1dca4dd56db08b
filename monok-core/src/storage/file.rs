//! JSON file backend
//!
//! Layout: `<base>/<identity>/session_summaries.json`,
//! `<base>/<identity>/files/user_insights.json` and
//! `<base>/<identity>/files/self_improvement/learnings.json`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::backend::{validate_identity, Document, StorageBackend};
use crate::error::{MonokError, Result};

/// Stores each document as a file below a base directory
#[derive(Debug, Clone)]
pub struct FileBackend {
    base_path: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `base_path` (created lazily on first write)
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Full path of a document for an identity
    pub fn document_path(&self, identity: &str, document: Document) -> Result<PathBuf> {
        validate_identity(identity)?;
        Ok(self
            .base_path
            .join(identity)
            .join(document.relative_path()))
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    async fn read(&self, identity: &str, document: Document) -> Result<Option<String>> {
        let path = self.document_path(identity, document)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MonokError::Storage(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn write(&self, identity: &str, document: Document, contents: String) -> Result<()> {
        let path = self.document_path(identity, document)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                MonokError::Storage(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }
        tokio::fs::write(&path, contents).await.map_err(|e| {
            MonokError::Storage(format!("failed to write {}: {}", path.display(), e))
        })?;
        tracing::trace!(path = %path.display(), "wrote document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_document_reads_none() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path());
        assert!(backend
            .read("nobody", Document::SessionSummaries)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_write_creates_nested_directories() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path());

        backend
            .write("u1", Document::Learnings, "{}".to_string())
            .await
            .unwrap();

        let expected = dir
            .path()
            .join("u1")
            .join("files")
            .join("self_improvement")
            .join("learnings.json");
        assert!(expected.exists());
        assert_eq!(
            backend.read("u1", Document::Learnings).await.unwrap().as_deref(),
            Some("{}")
        );
    }

    #[tokio::test]
    async fn test_rejects_path_escape() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path());
        let result = backend
            .write("..", Document::SessionSummaries, "{}".to_string())
            .await;
        assert!(matches!(result, Err(MonokError::InvalidIdentity(_))));
    }

    #[tokio::test]
    async fn test_unreadable_path_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path());
        // A directory where the file should be
        let path = backend.document_path("u1", Document::SessionSummaries).unwrap();
        std::fs::create_dir_all(&path).unwrap();

        let result = backend.read("u1", Document::SessionSummaries).await;
        assert!(matches!(result, Err(MonokError::Storage(_))));
    }
}
