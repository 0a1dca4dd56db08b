//! Self-improvement learnings about how to assist the user

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MonokError, Result};

use super::category::{
    first_observation, parse_category, same_observation, Category, CategoryLog, RecordOutcome,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningCategory {
    CommunicationStyle,
    TopicPreference,
    ResponseLength,
    Correction,
    Success,
    Adaptation,
}

impl Category for LearningCategory {
    const ALL: &'static [Self] = &[
        Self::CommunicationStyle,
        Self::TopicPreference,
        Self::ResponseLength,
        Self::Correction,
        Self::Success,
        Self::Adaptation,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::CommunicationStyle => "communication_style",
            Self::TopicPreference => "topic_preference",
            Self::ResponseLength => "response_length",
            Self::Correction => "correction",
            Self::Success => "success",
            Self::Adaptation => "adaptation",
        }
    }
}

impl FromStr for LearningCategory {
    type Err = MonokError;

    fn from_str(s: &str) -> Result<Self> {
        parse_category(s)
    }
}

impl fmt::Display for LearningCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confidence ladder: tentative -> emerging -> established
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningConfidence {
    #[default]
    Tentative,
    Emerging,
    Established,
}

impl LearningConfidence {
    /// One step up the ladder; `Established` stays put
    pub fn promote(self) -> Self {
        match self {
            Self::Tentative => Self::Emerging,
            Self::Emerging | Self::Established => Self::Established,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tentative => "tentative",
            Self::Emerging => "emerging",
            Self::Established => "established",
        }
    }
}

impl FromStr for LearningConfidence {
    type Err = MonokError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tentative" => Ok(Self::Tentative),
            "emerging" => Ok(Self::Emerging),
            "established" => Ok(Self::Established),
            other => Err(MonokError::InvalidValue {
                field: "confidence",
                value: other.to_string(),
                allowed: "tentative, emerging, established".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningEntry {
    pub id: u64,
    /// Stored under `insight`, the key existing learnings files use
    #[serde(rename = "insight")]
    pub learning: String,
    #[serde(default)]
    pub context: Option<String>,
    pub confidence: LearningConfidence,
    pub first_observed: DateTime<Utc>,
    pub last_observed: DateTime<Utc>,
    #[serde(default = "first_observation")]
    pub observation_count: u32,
}

pub type LearningsLog = CategoryLog<LearningCategory, LearningEntry>;

/// Input for [`record_learning`]
#[derive(Debug, Clone)]
pub struct NewLearning<'a> {
    pub category: LearningCategory,
    pub learning: &'a str,
    pub context: Option<&'a str>,
    pub confidence: Option<LearningConfidence>,
}

impl<'a> NewLearning<'a> {
    pub fn new(category: LearningCategory, learning: &'a str) -> Self {
        Self {
            category,
            learning,
            context: None,
            confidence: None,
        }
    }

    pub fn with_context(mut self, context: &'a str) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_confidence(mut self, confidence: LearningConfidence) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// Record a learning.
///
/// A matching entry is promoted one confidence step and its count bumped.
/// Otherwise a new entry is appended with an id from `next_id` and the given
/// confidence (default `tentative`).
pub fn record_learning(
    log: &mut LearningsLog,
    new: NewLearning<'_>,
    next_id: impl FnOnce() -> u64,
    now: DateTime<Utc>,
) -> RecordOutcome {
    let entries = log.entries_mut(new.category);

    let reinforced = match entries
        .iter_mut()
        .find(|entry| same_observation(&entry.learning, new.learning))
    {
        Some(entry) => {
            entry.confidence = entry.confidence.promote();
            entry.last_observed = now;
            entry.observation_count += 1;
            true
        }
        None => {
            entries.push(LearningEntry {
                id: next_id(),
                learning: new.learning.to_string(),
                context: new.context.map(str::to_string),
                confidence: new.confidence.unwrap_or_default(),
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
        category: new.category.as_str(),
        total,
        reinforced,
    }
}
