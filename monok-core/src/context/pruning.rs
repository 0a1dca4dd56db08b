//! Importance-based context pruning
//!
//! When a window grows past `max_messages_before_prune`, system messages and
//! the recent tail are kept verbatim, the older pool is ranked with
//! [`score_message_importance`], and a synthetic bridge message narrates what
//! was archived.

use std::borrow::Cow;
use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::message::{Message, MessageRole};

use super::config::ContextConfig;
use super::scoring::score_message_importance;

/// Appended when the pruned window would otherwise end on a non-user turn
pub const CONTINUATION_PROMPT: &str =
    "[Continue the conversation naturally based on the context above.]";

/// Topic rules for the bridge message
static BRIDGE_TOPICS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)\b(code|programming|function|api)\b", "code discussion"),
        (r"(?i)\b(file|folder|directory)\b", "files"),
        (r"(?i)\b(bug|fix|error)\b", "debugging"),
        (r"(?i)\b(prefer|like|want)\b", "preferences"),
    ]
    .into_iter()
    .map(|(pattern, topic)| (Regex::new(pattern).expect("static pattern"), topic))
    .collect()
});

/// A message from the older pool with its rank inputs
#[derive(Debug, Clone, Copy)]
pub struct ScoredMessage<'a> {
    pub message: &'a Message,
    /// Position within the older pool
    pub index: usize,
    pub score: f64,
}

/// Outcome of [`prune_messages`]
#[derive(Debug, Clone, Serialize)]
pub struct PruneResult<'a> {
    /// Borrowed input when nothing was pruned, otherwise the rebuilt window
    pub messages: Cow<'a, [Message]>,
    pub pruned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pruned_count: Option<usize>,
}

impl<'a> PruneResult<'a> {
    fn unchanged(messages: &'a [Message]) -> Self {
        Self {
            messages: Cow::Borrowed(messages),
            pruned: false,
            pruned_count: None,
        }
    }

    /// Take ownership of the resulting window
    pub fn into_messages(self) -> Vec<Message> {
        self.messages.into_owned()
    }
}

/// Ranking order: score descending, then pool index ascending
fn by_importance(a: &ScoredMessage<'_>, b: &ScoredMessage<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.index.cmp(&b.index))
}

/// Split the older pool into (kept, archived), both in chronological order
fn select_important<'a>(
    mut scored: Vec<ScoredMessage<'a>>,
    budget: usize,
) -> (Vec<ScoredMessage<'a>>, Vec<ScoredMessage<'a>>) {
    scored.sort_by(by_importance);
    let mut archived = scored.split_off(budget.min(scored.len()));
    let mut kept = scored;

    kept.sort_by_key(|s| s.index);
    archived.sort_by_key(|s| s.index);
    (kept, archived)
}

/// Detect which bridge topics appear in the archived text
pub fn archived_topics(text: &str) -> Vec<&'static str> {
    BRIDGE_TOPICS
        .iter()
        .filter(|(pattern, _)| pattern.is_match(text))
        .map(|(_, topic)| *topic)
        .collect()
}

/// Render the synthetic message standing in for archived turns
pub fn bridge_message(pruned_count: usize, topics: &[&str]) -> Message {
    let topics_str = if topics.is_empty() {
        String::new()
    } else {
        format!(" Topics covered: {}.", topics.join(", "))
    };

    Message::user(format!(
        "[System: {} earlier messages were archived (important context preserved via intelligent selection).{} Memory files contain additional context. Continue naturally.]",
        pruned_count, topics_str
    ))
}

/// Prune a message window down to the configured budget.
///
/// Windows at or under `max_messages_before_prune` are returned as-is. Larger
/// windows become `system ++ [bridge] ++ best older ++ recent tail`, and always
/// end on a user message.
pub fn prune_messages<'a>(messages: &'a [Message], config: &ContextConfig) -> PruneResult<'a> {
    if messages.len() <= config.max_messages_before_prune {
        return PruneResult::unchanged(messages);
    }

    let (system, conversation): (Vec<&Message>, Vec<&Message>) =
        messages.iter().partition(|m| m.is_system());

    let split = conversation
        .len()
        .saturating_sub(config.recent_messages_to_always_keep);
    let (older, recent) = conversation.split_at(split);

    let scored: Vec<ScoredMessage<'_>> = older
        .iter()
        .enumerate()
        .map(|(index, message)| ScoredMessage {
            message,
            index,
            score: score_message_importance(message, index, older.len()),
        })
        .collect();

    let (kept, archived) = select_important(scored, config.older_budget());
    let pruned_count = older.len() - kept.len();

    let archived_text = archived
        .iter()
        .map(|s| s.message.content.as_text().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ");
    let topics = archived_topics(&archived_text);

    let mut result: Vec<Message> = Vec::with_capacity(system.len() + kept.len() + recent.len() + 2);
    result.extend(system.into_iter().cloned());
    result.push(bridge_message(pruned_count, &topics));
    result.extend(kept.iter().map(|s| s.message.clone()));
    result.extend(recent.iter().map(|m| (*m).clone()));

    if result.last().is_some_and(|m| m.role != MessageRole::User) {
        result.push(Message::user(CONTINUATION_PROMPT));
    }

    tracing::debug!(
        input = messages.len(),
        output = result.len(),
        pruned_count,
        ?topics,
        "pruned context window"
    );

    PruneResult {
        messages: Cow::Owned(result),
        pruned: true,
        pruned_count: Some(pruned_count),
    }
}
