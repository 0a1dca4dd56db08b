//! Keyword topic extraction for session summaries

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum labels attached to one summary
pub const MAX_TOPICS: usize = 5;

static TOPIC_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"\b(code|coding|programming|developer)\b", "programming"),
        (r"\b(api|endpoint|server|backend)\b", "backend"),
        (r"\b(css|style|design|ui|ux)\b", "design"),
        (r"\b(bug|fix|error|issue)\b", "debugging"),
        (r"\b(feature|implement|add|create)\b", "features"),
        (r"\b(memory|context|history|recall)\b", "memory-system"),
        (r"\b(admin|user|auth)\b", "admin"),
        (r"\b(file|folder|directory)\b", "files"),
    ]
    .into_iter()
    .map(|(pattern, topic)| (Regex::new(pattern).expect("static pattern"), topic))
    .collect()
});

/// Map free text to at most five topic labels.
///
/// Labels come out in rule order, not in the order they occur in the text.
pub fn extract_topics(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    let mut topics: Vec<&'static str> = Vec::new();

    for (pattern, topic) in TOPIC_RULES.iter() {
        if topics.len() == MAX_TOPICS {
            break;
        }
        if !topics.contains(topic) && pattern.is_match(&lower) {
            topics.push(*topic);
        }
    }

    topics
}
