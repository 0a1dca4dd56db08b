//! Typed JSON documents on top of a [`StorageBackend`]

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::backend::{validate_identity, Document, StorageBackend};
use crate::error::Result;

/// Decodes and encodes per-identity JSON documents.
///
/// Absent or unparsable documents load as `T::default()`, so callers always
/// receive a fully-shaped value. Backend I/O failures are returned as errors.
#[derive(Clone)]
pub struct DocumentStore {
    backend: Arc<dyn StorageBackend>,
}

impl DocumentStore {
    /// Create a store over a backend
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Get the underlying backend
    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    /// Whether the document has ever been written
    pub async fn exists(&self, identity: &str, document: Document) -> Result<bool> {
        validate_identity(identity)?;
        Ok(self.backend.read(identity, document).await?.is_some())
    }

    /// Load a document, defaulting when it is missing or corrupt
    pub async fn load<T>(&self, identity: &str, document: Document) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        validate_identity(identity)?;
        let Some(raw) = self.backend.read(identity, document).await? else {
            return Ok(T::default());
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(
                    identity,
                    document = document.as_str(),
                    error = %e,
                    "discarding unparsable document"
                );
                Ok(T::default())
            }
        }
    }

    /// Overwrite a document with the pretty-printed JSON of `value`
    pub async fn save<T>(&self, identity: &str, document: Document, value: &T) -> Result<()>
    where
        T: Serialize + Sync,
    {
        validate_identity(identity)?;
        let contents = serde_json::to_string_pretty(value)?;
        self.backend.write(identity, document, contents).await
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore").finish_non_exhaustive()
    }
}
