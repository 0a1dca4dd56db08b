//! Storage backend trait for pluggable document persistence
//!
//! Each identity owns a small set of JSON documents. Backends only move raw
//! text; decoding and defaulting live in [`DocumentStore`](super::DocumentStore).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{MonokError, Result};

/// Documents persisted per identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Document {
    /// Session summary log
    SessionSummaries,
    /// Observed user insights
    UserInsights,
    /// Self-improvement learnings
    Learnings,
    /// Tagged memory index
    MemoryTags,
    /// Pending follow-up items
    PendingItems,
}

impl Document {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SessionSummaries => "session_summaries",
            Self::UserInsights => "user_insights",
            Self::Learnings => "learnings",
            Self::MemoryTags => "memory_tags",
            Self::PendingItems => "pending_items",
        }
    }

    /// Location below the identity's directory
    pub fn relative_path(&self) -> &'static str {
        match self {
            Self::SessionSummaries => "session_summaries.json",
            Self::UserInsights => "files/user_insights.json",
            Self::Learnings => "files/self_improvement/learnings.json",
            Self::MemoryTags => "files/memory_tags.json",
            Self::PendingItems => "files/pending_items.json",
        }
    }
}

/// Reject identities that cannot safely key a storage location
pub fn validate_identity(identity: &str) -> Result<()> {
    let invalid = identity.trim().is_empty()
        || identity == "."
        || identity == ".."
        || identity.contains(['/', '\\', '\0']);
    if invalid {
        return Err(MonokError::InvalidIdentity(identity.to_string()));
    }
    Ok(())
}

/// The core storage backend trait
///
/// Implementors load and overwrite whole documents keyed by identity:
///
/// - File backends (one JSON file per document)
/// - In-memory backends (tests, ephemeral sessions)
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read a document, `None` if it was never written
    async fn read(&self, identity: &str, document: Document) -> Result<Option<String>>;

    /// Replace a document's contents
    async fn write(&self, identity: &str, document: Document, contents: String) -> Result<()>;
}
