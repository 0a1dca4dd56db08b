//! Duplicate detection and greedy consolidation of session summaries

use std::collections::HashSet;

use super::similarity::{overlap, word_set};
use super::summary::SessionSummary;

/// Only the most recent summaries are checked for duplicates
pub const DUPLICATE_WINDOW: usize = 5;

/// Whether `candidate` repeats one of the last five summaries.
///
/// True iff the token-overlap similarity with any of them strictly exceeds
/// `threshold`. A candidate with no usable words is never a duplicate.
pub fn is_summary_duplicate(
    candidate: &str,
    existing: &[SessionSummary],
    threshold: f64,
) -> bool {
    let candidate_words = word_set(candidate);
    if candidate_words.is_empty() {
        return false;
    }

    let start = existing.len().saturating_sub(DUPLICATE_WINDOW);
    existing[start..].iter().any(|summary| {
        overlap(&candidate_words, &word_set(&summary.summary))
            .is_some_and(|similarity| similarity > threshold)
    })
}

/// Merge clusters of similar summaries in one left-to-right greedy pass.
///
/// Each unconsumed summary seeds a cluster that absorbs every later unconsumed
/// summary whose similarity *to the seed* exceeds `threshold`. A cluster of N > 1
/// becomes a new record copied from its last member, with the summary text
/// suffixed, topics unioned (seed first) and `merged_from = N`. Clusters keep
/// the position of their seed.
pub fn consolidate_similar_summaries(
    summaries: Vec<SessionSummary>,
    threshold: f64,
) -> Vec<SessionSummary> {
    if summaries.len() < 2 {
        return summaries;
    }

    let words: Vec<HashSet<String>> = summaries.iter().map(|s| word_set(&s.summary)).collect();
    let mut consumed = vec![false; summaries.len()];
    let mut consolidated = Vec::with_capacity(summaries.len());

    for seed in 0..summaries.len() {
        if consumed[seed] {
            continue;
        }
        consumed[seed] = true;

        let mut cluster = vec![seed];
        for other in seed + 1..summaries.len() {
            if consumed[other] {
                continue;
            }
            if overlap(&words[seed], &words[other]).is_some_and(|s| s > threshold) {
                consumed[other] = true;
                cluster.push(other);
            }
        }

        if cluster.len() == 1 {
            consolidated.push(summaries[seed].clone());
        } else {
            consolidated.push(merge_cluster(&summaries, &cluster));
        }
    }

    consolidated
}

fn merge_cluster(summaries: &[SessionSummary], cluster: &[usize]) -> SessionSummary {
    let mut topics: Vec<String> = Vec::new();
    for &member in cluster {
        for topic in &summaries[member].topics {
            if !topics.contains(topic) {
                topics.push(topic.clone());
            }
        }
    }

    let newest = &summaries[cluster[cluster.len() - 1]];
    SessionSummary {
        summary: format!(
            "{} (consolidated from {} similar sessions)",
            newest.summary,
            cluster.len()
        ),
        topics,
        merged_from: Some(cluster.len()),
        ..newest.clone()
    }
}
