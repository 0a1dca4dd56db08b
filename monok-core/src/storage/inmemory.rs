//! In-memory backend for testing and ephemeral deployments

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::backend::{validate_identity, Document, StorageBackend};
use crate::error::{MonokError, Result};

/// In-memory backend for testing and lightweight use
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    documents: RwLock<HashMap<(String, Document), String>>,
}

impl InMemoryBackend {
    /// Create a new in-memory backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.documents.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all documents
    pub fn clear(&self) {
        if let Ok(mut documents) = self.documents.write() {
            documents.clear();
        }
    }
}

fn poisoned<T>(_: T) -> MonokError {
    MonokError::Storage("in-memory backend lock poisoned".to_string())
}

#[async_trait]
impl StorageBackend for InMemoryBackend {
    async fn read(&self, identity: &str, document: Document) -> Result<Option<String>> {
        validate_identity(identity)?;
        let documents = self.documents.read().map_err(poisoned)?;
        Ok(documents.get(&(identity.to_string(), document)).cloned())
    }

    async fn write(&self, identity: &str, document: Document, contents: String) -> Result<()> {
        validate_identity(identity)?;
        let mut documents = self.documents.write().map_err(poisoned)?;
        documents.insert((identity.to_string(), document), contents);
        Ok(())
    }
}
