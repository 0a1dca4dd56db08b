//! Follow-up items carried between sessions

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MonokError, Result};

/// The list is compacted once it grows past this many items
const MAX_ITEMS: usize = 20;
/// Resolved items kept when compacting
const KEEP_RESOLVED: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = MonokError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(MonokError::InvalidValue {
                field: "priority",
                value: other.to_string(),
                allowed: "low, medium, high".to_string(),
            }),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingItem {
    pub id: u64,
    pub item: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub resolved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
}

/// Persisted pending items for one identity, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingItems {
    #[serde(default)]
    pub items: Vec<PendingItem>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl PendingItems {
    /// Highest item id (0 when empty)
    pub fn max_id(&self) -> u64 {
        self.items.iter().map(|i| i.id).max().unwrap_or(0)
    }

    /// Append an open item.
    ///
    /// Past 20 items the list is rebuilt as every unresolved item followed
    /// by the five most recently listed resolved ones.
    pub fn track(
        &mut self,
        id: u64,
        item: &str,
        context: Option<&str>,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> PendingItem {
        let tracked = PendingItem {
            id,
            item: item.to_string(),
            context: context.map(str::to_string),
            priority,
            created: now,
            resolved: false,
            resolved_at: None,
            resolution: None,
        };
        self.items.push(tracked.clone());
        self.last_updated = Some(now);

        if self.items.len() > MAX_ITEMS {
            let (open, mut resolved): (Vec<_>, Vec<_>) =
                std::mem::take(&mut self.items).into_iter().partition(|i| !i.resolved);
            let excess = resolved.len().saturating_sub(KEEP_RESOLVED);
            resolved.drain(..excess);
            self.items = open;
            self.items.extend(resolved);
        }

        tracked
    }

    /// Mark an item resolved, recording the optional note
    pub fn resolve(
        &mut self,
        id: u64,
        resolution: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<&PendingItem> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| MonokError::NotFound(format!("Pending item {} not found", id)))?;

        item.resolved = true;
        item.resolved_at = Some(now);
        item.resolution = resolution.map(str::to_string);
        self.last_updated = Some(now);
        Ok(item)
    }

    /// Items still open, in insertion order
    pub fn unresolved(&self) -> impl Iterator<Item = &PendingItem> {
        self.items.iter().filter(|i| !i.resolved)
    }
}
