//! Context window management
//!
//! Keeps the active window bounded: importance scoring, pruning with a
//! continuity bridge, and the auto-summary trigger policy. Everything here is
//! pure and safe to call from any thread.
//!
//! # Example
//!
//! ```rust,ignore
//! use monok_core::context::{prune_messages, ContextConfig};
//!
//! let result = prune_messages(&messages, &ContextConfig::default());
//! if result.pruned {
//!     println!("archived {} messages", result.pruned_count.unwrap_or(0));
//! }
//! ```

mod auto_summary;
mod config;
mod pruning;
mod scoring;

pub use auto_summary::{auto_summary_prompt, should_trigger_summary};
pub use config::ContextConfig;
pub use pruning::{
    archived_topics, bridge_message, prune_messages, PruneResult, ScoredMessage,
    CONTINUATION_PROMPT,
};
pub use scoring::score_message_importance;
