//! Context Window Configuration

use serde::{Deserialize, Serialize};

use crate::error::{MonokError, Result};

/// Configuration for context pruning and auto-summary triggering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Number of user exchanges between auto-summary requests
    pub summary_threshold: usize,

    /// Start pruning once the window holds more than this many messages
    pub max_messages_before_prune: usize,

    /// Number of non-system messages to keep after pruning
    pub messages_to_keep: usize,

    /// Most recent non-system messages that are always kept verbatim
    pub recent_messages_to_always_keep: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            summary_threshold: 12,
            max_messages_before_prune: 30,
            messages_to_keep: 15,
            recent_messages_to_always_keep: 6,
        }
    }
}

impl ContextConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the auto-summary threshold
    pub fn with_summary_threshold(mut self, threshold: usize) -> Self {
        self.summary_threshold = threshold;
        self
    }

    /// Set the prune trigger length
    pub fn with_max_messages_before_prune(mut self, max: usize) -> Self {
        self.max_messages_before_prune = max;
        self
    }

    /// Set the number of messages kept after pruning
    pub fn with_messages_to_keep(mut self, keep: usize) -> Self {
        self.messages_to_keep = keep;
        self
    }

    /// Set the always-kept recent tail length
    pub fn with_recent_messages_to_always_keep(mut self, recent: usize) -> Self {
        self.recent_messages_to_always_keep = recent;
        self
    }

    /// Slots left for importance-selected older messages
    pub fn older_budget(&self) -> usize {
        self.messages_to_keep
            .saturating_sub(self.recent_messages_to_always_keep)
    }

    /// Reject zero counts. The `recent <= keep <= max` ordering is only advisory.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("summary_threshold", self.summary_threshold),
            ("max_messages_before_prune", self.max_messages_before_prune),
            ("messages_to_keep", self.messages_to_keep),
            (
                "recent_messages_to_always_keep",
                self.recent_messages_to_always_keep,
            ),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(MonokError::Configuration(format!(
                    "context.{} must be positive",
                    name
                )));
            }
        }

        if self.recent_messages_to_always_keep > self.messages_to_keep
            || self.messages_to_keep > self.max_messages_before_prune
        {
            tracing::warn!(
                recent = self.recent_messages_to_always_keep,
                keep = self.messages_to_keep,
                max = self.max_messages_before_prune,
                "context config expects recent <= keep <= max_before_prune"
            );
        }

        Ok(())
    }
}
