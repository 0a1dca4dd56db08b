//! Persistent user insights and learnings

use std::sync::Arc;

use chrono::Utc;

use crate::error::Result;
use crate::id::RecordIdGenerator;
use crate::storage::{Document, DocumentStore};

use super::category::RecordOutcome;
use super::learning::{record_learning, LearningsLog, NewLearning};
use super::user::{insights_context, record_insight, InsightCategory, InsightConfidence, InsightsLog};

/// Load / modify / save access to the insight and learning documents
#[derive(Debug, Clone)]
pub struct InsightStore {
    documents: DocumentStore,
    ids: Arc<RecordIdGenerator>,
}

impl InsightStore {
    pub fn new(documents: DocumentStore, ids: Arc<RecordIdGenerator>) -> Self {
        Self { documents, ids }
    }

    pub async fn insights(&self, identity: &str) -> Result<InsightsLog> {
        self.documents.load(identity, Document::UserInsights).await
    }

    pub async fn learnings(&self, identity: &str) -> Result<LearningsLog> {
        self.documents.load(identity, Document::Learnings).await
    }

    /// Record or reinforce an observation about the user
    pub async fn record_insight(
        &self,
        identity: &str,
        category: InsightCategory,
        insight: &str,
        confidence: Option<InsightConfidence>,
    ) -> Result<RecordOutcome> {
        let mut log = self.insights(identity).await?;
        let outcome = record_insight(&mut log, category, insight, confidence, Utc::now());
        self.documents
            .save(identity, Document::UserInsights, &log)
            .await?;

        tracing::info!(
            identity,
            category = outcome.category,
            total = outcome.total,
            reinforced = outcome.reinforced,
            "recorded user insight"
        );
        Ok(outcome)
    }

    /// Prompt context built from reliable insights, `None` if there are none
    pub async fn insights_context(&self, identity: &str) -> Result<Option<String>> {
        let log = self.insights(identity).await?;
        Ok(insights_context(&log))
    }

    /// Record or promote a learning about how to assist the user
    pub async fn record_learning(
        &self,
        identity: &str,
        learning: NewLearning<'_>,
    ) -> Result<RecordOutcome> {
        let mut log = self.learnings(identity).await?;
        let floor = log
            .categories
            .values()
            .flatten()
            .map(|entry| entry.id)
            .max()
            .unwrap_or(0);

        let outcome = record_learning(&mut log, learning, || self.ids.next_above(floor), Utc::now());
        self.documents
            .save(identity, Document::Learnings, &log)
            .await?;

        tracing::info!(
            identity,
            category = outcome.category,
            total = outcome.total,
            reinforced = outcome.reinforced,
            "recorded learning"
        );
        Ok(outcome)
    }
}
