//! Memory engine: every operation bound to one configuration and backend

use std::sync::Arc;

use crate::config::MonokConfig;
use crate::context::{self, PruneResult};
use crate::error::Result;
use crate::id::RecordIdGenerator;
use crate::insights::{InsightCategory, InsightConfidence, InsightStore, NewLearning, RecordOutcome};
use crate::message::Message;
use crate::notes::{Importance, NoteStore, PendingItem, PendingItems, Priority, TagEntry, TagSearch};
use crate::sessions::{SaveOutcome, SessionSummary, SessionSummaryStore};
use crate::storage::{DocumentStore, FileBackend, StorageBackend};

/// Entry point for hosts.
///
/// Cheap to clone; clones share the backend and id generator.
///
/// # Example
///
/// ```rust,no_run
/// use monok_core::prelude::*;
///
/// # async fn run(history: Vec<Message>) -> Result<()> {
/// let engine = MemoryEngine::open(MonokConfig::load()?)?;
///
/// let window = engine.prune_messages(&history);
/// if engine.should_trigger_summary(&window.messages) {
///     // ask the assistant for a summary, then:
///     engine
///         .save_session_summary("user-1", "Planned the release", history.len(), "")
///         .await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryEngine {
    config: Arc<MonokConfig>,
    sessions: SessionSummaryStore,
    insights: InsightStore,
    notes: NoteStore,
}

impl MemoryEngine {
    /// Create an engine over an explicit backend
    pub fn new(config: MonokConfig, backend: Arc<dyn StorageBackend>) -> Result<Self> {
        config.validate()?;

        let documents = DocumentStore::new(backend);
        let ids = Arc::new(RecordIdGenerator::new());
        let sessions = SessionSummaryStore::new(documents.clone(), ids.clone(), config.sessions.clone());
        let insights = InsightStore::new(documents.clone(), ids.clone());
        let notes = NoteStore::new(documents, ids);

        tracing::debug!(base_path = %config.base_path.display(), "memory engine ready");

        Ok(Self {
            config: Arc::new(config),
            sessions,
            insights,
            notes,
        })
    }

    /// Create an engine storing JSON files under `config.base_path`
    pub fn open(config: MonokConfig) -> Result<Self> {
        let backend = Arc::new(FileBackend::new(config.base_path.clone()));
        Self::new(config, backend)
    }

    pub fn config(&self) -> &MonokConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionSummaryStore {
        &self.sessions
    }

    pub fn insights(&self) -> &InsightStore {
        &self.insights
    }

    pub fn notes(&self) -> &NoteStore {
        &self.notes
    }

    /// Prune a window with the configured budget
    pub fn prune_messages<'a>(&self, messages: &'a [Message]) -> PruneResult<'a> {
        context::prune_messages(messages, &self.config.context)
    }

    /// Whether the host should request a summary now
    pub fn should_trigger_summary(&self, messages: &[Message]) -> bool {
        context::should_trigger_summary(messages, &self.config.context)
    }

    /// Summary request text for the configured exchange interval
    pub fn auto_summary_prompt(&self) -> String {
        context::auto_summary_prompt(self.config.context.summary_threshold)
    }

    pub async fn save_session_summary(
        &self,
        identity: &str,
        summary: &str,
        message_count: usize,
        conversation_text: &str,
    ) -> Result<SaveOutcome> {
        self.sessions
            .save(identity, summary, message_count, conversation_text)
            .await
    }

    pub async fn recent_session_summaries(
        &self,
        identity: &str,
        limit: usize,
    ) -> Result<Vec<SessionSummary>> {
        self.sessions.recent(identity, limit).await
    }

    pub async fn record_insight(
        &self,
        identity: &str,
        category: InsightCategory,
        insight: &str,
        confidence: Option<InsightConfidence>,
    ) -> Result<RecordOutcome> {
        self.insights
            .record_insight(identity, category, insight, confidence)
            .await
    }

    pub async fn user_insights_context(&self, identity: &str) -> Result<Option<String>> {
        self.insights.insights_context(identity).await
    }

    pub async fn record_learning(
        &self,
        identity: &str,
        learning: NewLearning<'_>,
    ) -> Result<RecordOutcome> {
        self.insights.record_learning(identity, learning).await
    }

    pub async fn tag_memory<S: AsRef<str>>(
        &self,
        identity: &str,
        tags: &[S],
        summary: &str,
        importance: Importance,
    ) -> Result<TagEntry> {
        self.notes
            .tag_memory(identity, tags, summary, importance)
            .await
    }

    pub async fn search_by_tag(&self, identity: &str, tag: &str) -> Result<TagSearch> {
        self.notes.search_by_tag(identity, tag).await
    }

    pub async fn track_pending_item(
        &self,
        identity: &str,
        item: &str,
        context: Option<&str>,
        priority: Priority,
    ) -> Result<PendingItem> {
        self.notes
            .track_pending_item(identity, item, context, priority)
            .await
    }

    pub async fn resolve_pending_item(
        &self,
        identity: &str,
        id: u64,
        resolution: Option<&str>,
    ) -> Result<PendingItem> {
        self.notes
            .resolve_pending_item(identity, id, resolution)
            .await
    }

    pub async fn pending_items(&self, identity: &str) -> Result<PendingItems> {
        self.notes.pending(identity).await
    }
}
