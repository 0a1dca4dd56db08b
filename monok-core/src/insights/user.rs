//! Observations about the user

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MonokError, Result};

use super::category::{
    first_observation, parse_category, same_observation, Category, CategoryLog, RecordOutcome,
};

/// What an insight is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    Preferences,
    CommunicationStyle,
    WorkPatterns,
    Interests,
    Goals,
    Context,
}

impl Category for InsightCategory {
    const ALL: &'static [Self] = &[
        Self::Preferences,
        Self::CommunicationStyle,
        Self::WorkPatterns,
        Self::Interests,
        Self::Goals,
        Self::Context,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Preferences => "preferences",
            Self::CommunicationStyle => "communication_style",
            Self::WorkPatterns => "work_patterns",
            Self::Interests => "interests",
            Self::Goals => "goals",
            Self::Context => "context",
        }
    }
}

impl FromStr for InsightCategory {
    type Err = MonokError;

    fn from_str(s: &str) -> Result<Self> {
        parse_category(s)
    }
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How well an insight is supported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightConfidence {
    #[default]
    ObservedOnce,
    PatternEmerging,
    WellEstablished,
}

impl InsightConfidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ObservedOnce => "observed_once",
            Self::PatternEmerging => "pattern_emerging",
            Self::WellEstablished => "well_established",
        }
    }

    /// Whether the insight is solid enough to show the assistant
    pub fn is_reliable(&self) -> bool {
        !matches!(self, Self::ObservedOnce)
    }
}

impl FromStr for InsightConfidence {
    type Err = MonokError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "observed_once" => Ok(Self::ObservedOnce),
            "pattern_emerging" => Ok(Self::PatternEmerging),
            "well_established" => Ok(Self::WellEstablished),
            other => Err(MonokError::InvalidValue {
                field: "confidence",
                value: other.to_string(),
                allowed: "observed_once, pattern_emerging, well_established".to_string(),
            }),
        }
    }
}

/// A single observation about the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightEntry {
    pub insight: String,
    pub confidence: InsightConfidence,
    pub first_observed: DateTime<Utc>,
    pub last_observed: DateTime<Utc>,
    #[serde(default = "first_observation")]
    pub observation_count: u32,
}

pub type InsightsLog = CategoryLog<InsightCategory, InsightEntry>;

/// Record an observation, reinforcing a matching entry if one exists.
///
/// A reinforced entry takes `confidence` (or `pattern_emerging` when none is
/// given) and bumps its observation count. New entries start at
/// `observed_once` unless a confidence is supplied.
pub fn record_insight(
    log: &mut InsightsLog,
    category: InsightCategory,
    insight: &str,
    confidence: Option<InsightConfidence>,
    now: DateTime<Utc>,
) -> RecordOutcome {
    let entries = log.entries_mut(category);

    let reinforced = match entries
        .iter_mut()
        .find(|entry| same_observation(&entry.insight, insight))
    {
        Some(entry) => {
            entry.confidence = confidence.unwrap_or(InsightConfidence::PatternEmerging);
            entry.last_observed = now;
            entry.observation_count += 1;
            true
        }
        None => {
            entries.push(InsightEntry {
                insight: insight.to_string(),
                confidence: confidence.unwrap_or_default(),
                first_observed: now,
                last_observed: now,
                observation_count: 1,
            });
            false
        }
    };

    let total = entries.len();
    log.last_updated = Some(now);

    RecordOutcome {
        category: category.as_str(),
        total,
        reinforced,
    }
}

/// Render reliable insights as prompt context.
///
/// One `**category**: a; b` line per category that has at least one
/// insight beyond `observed_once`. `None` when nothing qualifies.
pub fn insights_context(log: &InsightsLog) -> Option<String> {
    let lines: Vec<String> = log
        .populated()
        .filter_map(|(category, entries)| {
            let reliable: Vec<&str> = entries
                .iter()
                .filter(|entry| entry.confidence.is_reliable())
                .map(|entry| entry.insight.as_str())
                .collect();
            if reliable.is_empty() {
                None
            } else {
                Some(format!("**{}**: {}", category.label(), reliable.join("; ")))
            }
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}
