//! Persistent memory tags and pending items

use std::sync::Arc;

use chrono::Utc;

use crate::error::{MonokError, Result};
use crate::id::RecordIdGenerator;
use crate::storage::{Document, DocumentStore};

use super::pending::{PendingItem, PendingItems, Priority};
use super::tags::{search_by_tag, tag_memory, Importance, TagEntry, TagIndex, TagSearch};

/// Load / modify / save access to the tag and pending-item documents
#[derive(Debug, Clone)]
pub struct NoteStore {
    documents: DocumentStore,
    ids: Arc<RecordIdGenerator>,
}

impl NoteStore {
    pub fn new(documents: DocumentStore, ids: Arc<RecordIdGenerator>) -> Self {
        Self { documents, ids }
    }

    pub async fn tag_index(&self, identity: &str) -> Result<TagIndex> {
        self.documents.load(identity, Document::MemoryTags).await
    }

    pub async fn pending(&self, identity: &str) -> Result<PendingItems> {
        self.documents.load(identity, Document::PendingItems).await
    }

    /// File a memory summary under the given tags
    pub async fn tag_memory<S: AsRef<str>>(
        &self,
        identity: &str,
        tags: &[S],
        summary: &str,
        importance: Importance,
    ) -> Result<TagEntry> {
        let mut index = self.tag_index(identity).await?;
        let id = self.ids.next_above(index.max_id());
        let entry = tag_memory(&mut index, tags, summary, importance, id, Utc::now())?;
        self.documents
            .save(identity, Document::MemoryTags, &index)
            .await?;

        tracing::info!(
            identity,
            id = entry.id,
            tags = %entry.tags.join(", "),
            "tagged memory"
        );
        Ok(entry)
    }

    pub async fn search_by_tag(&self, identity: &str, tag: &str) -> Result<TagSearch> {
        let index = self.tag_index(identity).await?;
        Ok(search_by_tag(&index, tag))
    }

    /// Start tracking a follow-up item
    pub async fn track_pending_item(
        &self,
        identity: &str,
        item: &str,
        context: Option<&str>,
        priority: Priority,
    ) -> Result<PendingItem> {
        let mut pending = self.pending(identity).await?;
        let id = self.ids.next_above(pending.max_id());
        let tracked = pending.track(id, item, context, priority, Utc::now());
        self.documents
            .save(identity, Document::PendingItems, &pending)
            .await?;

        tracing::info!(identity, id, open = pending.unresolved().count(), "tracking pending item");
        Ok(tracked)
    }

    /// Resolve a tracked item.
    ///
    /// Fails with [`MonokError::NotFound`] when nothing was ever tracked or
    /// the id is unknown.
    pub async fn resolve_pending_item(
        &self,
        identity: &str,
        id: u64,
        resolution: Option<&str>,
    ) -> Result<PendingItem> {
        if !self.documents.exists(identity, Document::PendingItems).await? {
            return Err(MonokError::NotFound("No pending items found".to_string()));
        }

        let mut pending = self.pending(identity).await?;
        let resolved = pending.resolve(id, resolution, Utc::now())?.clone();
        self.documents
            .save(identity, Document::PendingItems, &pending)
            .await?;

        tracing::info!(identity, id, "resolved pending item");
        Ok(resolved)
    }
}
