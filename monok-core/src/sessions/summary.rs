//! Session summary records and the per-identity summary log

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use super::config::SessionsConfig;
use super::consolidation::consolidate_similar_summaries;

/// Consolidation runs once the log is longer than this...
const CONSOLIDATE_AFTER: usize = 10;
/// ...and its length is a multiple of this
const CONSOLIDATE_EVERY: usize = 5;

/// One summarized conversation session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    /// Unique, increasing identifier
    pub id: u64,
    /// When the summary was recorded
    pub timestamp: DateTime<Utc>,
    /// Human-readable local date (`M/D/YYYY`)
    pub date: String,
    /// Number of messages the summary covers
    pub message_count: usize,
    /// Caller-supplied summary text
    #[serde(default)]
    pub summary: String,
    /// Up to five topic labels
    #[serde(default)]
    pub topics: Vec<String>,
    /// Number of sessions merged into this record, if consolidated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merged_from: Option<usize>,
}

impl SessionSummary {
    /// Create a summary stamped with the current time
    pub fn new(
        id: u64,
        message_count: usize,
        summary: impl Into<String>,
        topics: Vec<String>,
    ) -> Self {
        Self {
            id,
            timestamp: Utc::now(),
            date: Local::now().format("%-m/%-d/%Y").to_string(),
            message_count,
            summary: summary.into(),
            topics,
            merged_from: None,
        }
    }

    /// Whether this record stands in for several sessions
    pub fn is_consolidated(&self) -> bool {
        self.merged_from.is_some()
    }
}

/// Persisted summary log for one identity, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStore {
    #[serde(default)]
    pub summaries: Vec<SessionSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl SessionStore {
    /// Highest id in the log (0 when empty)
    pub fn max_id(&self) -> u64 {
        self.summaries.iter().map(|s| s.id).max().unwrap_or(0)
    }

    /// Last `limit` summaries in chronological order
    pub fn recent(&self, limit: usize) -> &[SessionSummary] {
        let start = self.summaries.len().saturating_sub(limit);
        &self.summaries[start..]
    }

    /// Append a summary, then apply periodic consolidation and retention.
    ///
    /// Consolidation runs when the new length is above 10 and a multiple of 5.
    /// Retention keeps the newest `max_summaries` entries, so the appended
    /// record always survives.
    pub fn append(&mut self, summary: SessionSummary, config: &SessionsConfig) {
        self.summaries.push(summary);

        let len = self.summaries.len();
        if len > CONSOLIDATE_AFTER && len % CONSOLIDATE_EVERY == 0 {
            let summaries = std::mem::take(&mut self.summaries);
            self.summaries =
                consolidate_similar_summaries(summaries, config.consolidation_threshold);
            tracing::debug!(
                before = len,
                after = self.summaries.len(),
                "consolidated session summaries"
            );
        }

        if self.summaries.len() > config.max_summaries {
            let excess = self.summaries.len() - config.max_summaries;
            self.summaries.drain(..excess);
            tracing::debug!(dropped = excess, "trimmed session summaries to retention limit");
        }

        self.last_updated = Some(Utc::now());
    }
}

/// Result of saving a summary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SaveOutcome {
    /// The summary was appended and persisted
    Saved { summary: SessionSummary },
    /// The summary was too similar to a recent one; nothing was written
    Skipped { reason: String },
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    /// The stored summary, if saved
    pub fn summary(&self) -> Option<&SessionSummary> {
        match self {
            Self::Saved { summary } => Some(summary),
            Self::Skipped { .. } => None,
        }
    }
}
