//! Category-keyed observation logs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MonokError, Result};

/// Characters compared when deciding whether two observations are the same
const MATCH_PREFIX_CHARS: usize = 30;

/// A fixed vocabulary of categories
pub trait Category: Copy + Ord + 'static {
    /// Every category, in display order
    const ALL: &'static [Self];

    /// Stable snake_case name
    fn as_str(&self) -> &'static str;

    /// Human-readable name (`work_patterns` -> `work patterns`)
    fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

/// Comma-separated allow-list
pub fn allowed<C: Category>() -> String {
    C::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a category name against the allow-list
pub fn parse_category<C: Category>(value: &str) -> Result<C> {
    C::ALL
        .iter()
        .copied()
        .find(|c| c.as_str() == value)
        .ok_or_else(|| MonokError::InvalidCategory {
            value: value.to_string(),
            allowed: allowed::<C>(),
        })
}

/// Entries grouped by category, plus the time of the last change.
///
/// Serializes as a flat JSON object: one array per category and a
/// `last_updated` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "C: Serialize + Ord, E: Serialize",
    deserialize = "C: Deserialize<'de> + Ord, E: Deserialize<'de>"
))]
pub struct CategoryLog<C, E> {
    #[serde(flatten)]
    pub categories: BTreeMap<C, Vec<E>>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl<C, E> Default for CategoryLog<C, E> {
    fn default() -> Self {
        Self {
            categories: BTreeMap::new(),
            last_updated: None,
        }
    }
}

impl<C: Category, E> CategoryLog<C, E> {
    /// Entries of one category
    pub fn entries(&self, category: C) -> &[E] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Mutable entries of one category, creating the list on demand
    pub fn entries_mut(&mut self, category: C) -> &mut Vec<E> {
        self.categories.entry(category).or_default()
    }

    /// Non-empty categories in display order
    pub fn populated(&self) -> impl Iterator<Item = (C, &[E])> {
        self.categories
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(category, entries)| (*category, entries.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.populated().next().is_none()
    }
}

fn prefix(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Whether two observation texts describe the same thing.
///
/// Case-insensitive: either text contains the other's first 30 characters.
pub fn same_observation(existing: &str, candidate: &str) -> bool {
    let existing = existing.to_lowercase();
    let candidate = candidate.to_lowercase();
    existing.contains(prefix(&candidate, MATCH_PREFIX_CHARS))
        || candidate.contains(prefix(&existing, MATCH_PREFIX_CHARS))
}

/// Observation count assumed for entries written without one
pub(crate) fn first_observation() -> u32 {
    1
}

/// Result of recording an observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordOutcome {
    pub category: &'static str,
    /// Entries in the category after recording
    pub total: usize,
    /// True when an existing entry was reinforced instead of appended
    pub reinforced: bool,
}
