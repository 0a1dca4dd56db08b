//! # Monok - Bounded Context and Session Recall for Assistants
//!
//! Monok keeps a long-running assistant conversation inside a fixed budget
//! while preserving continuity across sessions:
//! - Importance scoring of individual messages
//! - Context pruning with a bridge message that narrates what was archived
//! - An auto-summary trigger policy
//! - A per-identity session summary log with deduplication, consolidation
//!   and retention
//! - Category-keyed user insights and self-improvement learnings
//! - Tagged memories and pending follow-up items
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use monok_core::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let engine = MemoryEngine::open(MonokConfig::default())?;
//!
//!     let history = vec![Message::user("I prefer short answers"), Message::assistant("Noted.")];
//!     let window = engine.prune_messages(&history);
//!     assert!(!window.pruned);
//!
//!     engine
//!         .save_session_summary("user-1", "Agreed on answer style", history.len(), "")
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The [`context`] functions are pure. Persistent state goes through a
//! [`storage::StorageBackend`] (JSON files by default) wrapped by
//! [`storage::DocumentStore`], and the [`engine::MemoryEngine`] binds it all
//! to one [`config::MonokConfig`].

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod id;
pub mod insights;
pub mod message;
pub mod notes;
pub mod sessions;
pub mod storage;

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::MonokConfig;
    pub use crate::context::{
        auto_summary_prompt, prune_messages, score_message_importance, should_trigger_summary,
        ContextConfig, PruneResult,
    };
    pub use crate::engine::MemoryEngine;
    pub use crate::error::{MonokError, Result};
    pub use crate::insights::{
        InsightCategory, InsightConfidence, LearningCategory, LearningConfidence, NewLearning,
        RecordOutcome,
    };
    pub use crate::message::{Message, MessageContent, MessageRole};
    pub use crate::notes::{Importance, PendingItem, Priority, TagEntry, TagSearch};
    pub use crate::sessions::{
        consolidate_similar_summaries, extract_topics, is_summary_duplicate, SaveOutcome,
        SessionSummary, SessionsConfig,
    };
    pub use crate::storage::{FileBackend, InMemoryBackend, StorageBackend};
}
