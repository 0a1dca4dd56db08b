//! Tagged memories and tag lookup

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MonokError, Result};

/// How much a tagged memory matters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Importance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl FromStr for Importance {
    type Err = MonokError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(MonokError::InvalidValue {
                field: "importance",
                value: other.to_string(),
                allowed: "low, medium, high, critical".to_string(),
            }),
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tagged memory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagEntry {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub tags: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub importance: Importance,
}

/// Tagged memories plus an index from tag to entry ids
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagIndex {
    #[serde(default)]
    pub tags: BTreeMap<String, Vec<u64>>,
    #[serde(default)]
    pub entries: Vec<TagEntry>,
}

impl TagIndex {
    /// Highest entry id (0 when empty)
    pub fn max_id(&self) -> u64 {
        self.entries.iter().map(|e| e.id).max().unwrap_or(0)
    }
}

/// Result of a tag lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagSearch {
    /// Entries filed under the queried tag
    pub exact_matches: Vec<TagEntry>,
    /// Other entries with a tag containing the query
    pub partial_matches: Vec<TagEntry>,
    /// Every known tag, sorted
    pub all_tags: Vec<String>,
}

/// Trim tags, drop blanks and repeats, keep first-seen order
fn clean_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !cleaned.iter().any(|t| t == tag) {
            cleaned.push(tag.to_string());
        }
    }
    cleaned
}

/// File a memory under one or more tags.
///
/// Fails with [`MonokError::InvalidInput`] when no tag survives trimming.
pub fn tag_memory<S: AsRef<str>>(
    index: &mut TagIndex,
    tags: &[S],
    summary: &str,
    importance: Importance,
    id: u64,
    now: DateTime<Utc>,
) -> Result<TagEntry> {
    let tags = clean_tags(tags);
    if tags.is_empty() {
        return Err(MonokError::InvalidInput(
            "tags must contain at least one non-empty string".to_string(),
        ));
    }

    for tag in &tags {
        index.tags.entry(tag.clone()).or_default().push(id);
    }

    let entry = TagEntry {
        id,
        timestamp: now,
        tags,
        summary: summary.to_string(),
        importance,
    };
    index.entries.push(entry.clone());
    Ok(entry)
}

/// Look up memories by tag, case-insensitively.
///
/// Exact matches are entries indexed under a tag equal to `query`; partial
/// matches are the remaining entries with a tag containing it.
pub fn search_by_tag(index: &TagIndex, query: &str) -> TagSearch {
    let query = query.trim().to_lowercase();

    let exact_ids: Vec<u64> = index
        .tags
        .iter()
        .filter(|(tag, _)| tag.to_lowercase() == query)
        .flat_map(|(_, ids)| ids.iter().copied())
        .collect();

    let (exact_matches, rest): (Vec<&TagEntry>, Vec<&TagEntry>) = index
        .entries
        .iter()
        .partition(|entry| exact_ids.contains(&entry.id));

    let partial_matches = rest
        .into_iter()
        .filter(|entry| {
            entry
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&query))
        })
        .cloned()
        .collect();

    TagSearch {
        exact_matches: exact_matches.into_iter().cloned().collect(),
        partial_matches,
        all_tags: index.tags.keys().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(index: &mut TagIndex, tags: &[&str], summary: &str, id: u64) -> TagEntry {
        tag_memory(index, tags, summary, Importance::default(), id, Utc::now()).unwrap()
    }

    #[test]
    fn test_importance_parse() {
        assert_eq!("critical".parse::<Importance>().unwrap(), Importance::Critical);
        let err = "urgent".parse::<Importance>().unwrap_err();
        assert!(err.to_string().contains("low, medium, high, critical"));
        assert_eq!(Importance::default(), Importance::Medium);
    }

    #[test]
    fn test_tags_are_trimmed_and_indexed() {
        let mut index = TagIndex::default();
        let entry = tagged(&mut index, &[" work ", "", "important", "work"], "Deadline moved", 5);

        assert_eq!(entry.tags, vec!["work", "important"]);
        assert_eq!(index.tags["work"], vec![5]);
        assert_eq!(index.tags["important"], vec![5]);
        assert_eq!(index.entries.len(), 1);
        assert_eq!(index.max_id(), 5);
    }

    #[test]
    fn test_blank_tags_rejected() {
        let mut index = TagIndex::default();
        let none: [&str; 0] = [];
        for tags in [&none[..], &["  ", ""][..]] {
            let result = tag_memory(&mut index, tags, "x", Importance::Low, 1, Utc::now());
            assert!(matches!(result, Err(MonokError::InvalidInput(_))));
        }
        assert!(index.entries.is_empty());
        assert!(index.tags.is_empty());
    }

    #[test]
    fn test_exact_and_partial_matches() {
        let mut index = TagIndex::default();
        tagged(&mut index, &["coding"], "Wrote a parser", 1);
        tagged(&mut index, &["coding-project"], "Started a project", 2);
        tagged(&mut index, &["Coding", "travel"], "Coded on the train", 3);
        tagged(&mut index, &["garden"], "Planted tomatoes", 4);

        let found = search_by_tag(&index, "CODING");
        let exact: Vec<u64> = found.exact_matches.iter().map(|e| e.id).collect();
        let partial: Vec<u64> = found.partial_matches.iter().map(|e| e.id).collect();
        assert_eq!(exact, vec![1, 3]);
        assert_eq!(partial, vec![2]);
        assert_eq!(
            found.all_tags,
            vec!["Coding", "coding", "coding-project", "garden", "travel"]
        );
    }

    #[test]
    fn test_search_empty_index() {
        let found = search_by_tag(&TagIndex::default(), "anything");
        assert!(found.exact_matches.is_empty());
        assert!(found.partial_matches.is_empty());
        assert!(found.all_tags.is_empty());
    }
}
