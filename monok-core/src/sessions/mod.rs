//! Session summaries
//!
//! A durable, deduplicated log of conversation summaries per identity, with
//! keyword topics and periodic consolidation of near-identical entries.
//! Similarity is lexical token overlap only.

mod config;
mod consolidation;
mod similarity;
mod store;
mod summary;
mod topics;

pub use config::SessionsConfig;
pub use consolidation::{consolidate_similar_summaries, is_summary_duplicate, DUPLICATE_WINDOW};
pub use similarity::{overlap, text_similarity, word_set};
pub use store::{SessionSummaryStore, DEFAULT_RECENT_LIMIT, DUPLICATE_REASON};
pub use summary::{SaveOutcome, SessionStore, SessionSummary};
pub use topics::{extract_topics, MAX_TOPICS};
