//! Session summary store: dedup gate, append, consolidation, retention

use std::sync::Arc;

use crate::error::Result;
use crate::id::RecordIdGenerator;
use crate::storage::{Document, DocumentStore};

use super::config::SessionsConfig;
use super::consolidation::is_summary_duplicate;
use super::summary::{SaveOutcome, SessionStore, SessionSummary};
use super::topics::extract_topics;

/// Reason reported when a summary is skipped
pub const DUPLICATE_REASON: &str = "Summary too similar to recent session";

/// Default number of summaries returned by [`SessionSummaryStore::recent`]
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Per-identity session summary log.
///
/// Each operation is a load / modify / save round trip and is not atomic:
/// callers must not run two `save` calls for the same identity concurrently.
///
/// # Example
///
/// ```rust,ignore
/// let sessions = SessionSummaryStore::new(documents, ids, SessionsConfig::default());
///
/// match sessions.save("user-1", "Planned the data migration", 24, &transcript).await? {
///     SaveOutcome::Saved { summary } => println!("saved #{}", summary.id),
///     SaveOutcome::Skipped { reason } => println!("skipped: {}", reason),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SessionSummaryStore {
    documents: DocumentStore,
    ids: Arc<RecordIdGenerator>,
    config: SessionsConfig,
}

impl SessionSummaryStore {
    /// Create a new session summary store
    pub fn new(documents: DocumentStore, ids: Arc<RecordIdGenerator>, config: SessionsConfig) -> Self {
        Self {
            documents,
            ids,
            config,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &SessionsConfig {
        &self.config
    }

    /// Load the full log for an identity (empty if none was saved)
    pub async fn load(&self, identity: &str) -> Result<SessionStore> {
        self.documents
            .load(identity, Document::SessionSummaries)
            .await
    }

    /// Record a summary unless it duplicates one of the five most recent.
    ///
    /// Topics are extracted from `conversation_text`. Skipped summaries cause
    /// no write at all.
    pub async fn save(
        &self,
        identity: &str,
        summary: &str,
        message_count: usize,
        conversation_text: &str,
    ) -> Result<SaveOutcome> {
        let mut store = self.load(identity).await?;

        if is_summary_duplicate(summary, &store.summaries, self.config.deduplication_threshold) {
            tracing::debug!(identity, "skipping duplicate session summary");
            return Ok(SaveOutcome::Skipped {
                reason: DUPLICATE_REASON.to_string(),
            });
        }

        let topics = extract_topics(conversation_text)
            .into_iter()
            .map(str::to_string)
            .collect();
        let record = SessionSummary::new(
            self.ids.next_above(store.max_id()),
            message_count,
            summary,
            topics,
        );

        store.append(record.clone(), &self.config);
        self.documents
            .save(identity, Document::SessionSummaries, &store)
            .await?;

        tracing::info!(
            identity,
            id = record.id,
            stored = store.summaries.len(),
            "saved session summary: {}",
            preview(summary)
        );

        Ok(SaveOutcome::Saved { summary: record })
    }

    /// Last `limit` summaries, oldest first
    pub async fn recent(&self, identity: &str, limit: usize) -> Result<Vec<SessionSummary>> {
        let store = self.load(identity).await?;
        Ok(store.recent(limit).to_vec())
    }
}

/// First 100 characters for log lines
fn preview(text: &str) -> String {
    match text.char_indices().nth(100) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
