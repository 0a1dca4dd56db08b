//! Session summary log configuration

use serde::{Deserialize, Serialize};

use crate::error::{MonokError, Result};

/// Configuration for the per-identity session summary log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionsConfig {
    /// Maximum number of summaries retained per identity (default: 20)
    pub max_summaries: usize,

    /// Similarity above which a new summary is skipped as a duplicate (0-1, default: 0.7)
    pub deduplication_threshold: f64,

    /// Similarity above which stored summaries are merged (0-1, default: 0.6)
    pub consolidation_threshold: f64,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            max_summaries: 20,
            deduplication_threshold: 0.7,
            consolidation_threshold: 0.6,
        }
    }
}

impl SessionsConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the retention limit
    pub fn with_max_summaries(mut self, max: usize) -> Self {
        self.max_summaries = max;
        self
    }

    /// Set the deduplication threshold
    pub fn with_deduplication_threshold(mut self, threshold: f64) -> Self {
        self.deduplication_threshold = threshold;
        self
    }

    /// Set the consolidation threshold
    pub fn with_consolidation_threshold(mut self, threshold: f64) -> Self {
        self.consolidation_threshold = threshold;
        self
    }

    /// Check that the retention limit is positive and both thresholds lie in (0, 1)
    pub fn validate(&self) -> Result<()> {
        if self.max_summaries == 0 {
            return Err(MonokError::Configuration(
                "sessions.max_summaries must be positive".to_string(),
            ));
        }
        for (name, value) in [
            ("deduplication_threshold", self.deduplication_threshold),
            ("consolidation_threshold", self.consolidation_threshold),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(MonokError::Configuration(format!(
                    "sessions.{} must be between 0 and 1 (exclusive), got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionsConfig::default();
        assert_eq!(config.max_summaries, 20);
        assert_eq!(config.deduplication_threshold, 0.7);
        assert_eq!(config.consolidation_threshold, 0.6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(SessionsConfig::new().with_deduplication_threshold(1.0).validate().is_err());
        assert!(SessionsConfig::new().with_consolidation_threshold(0.0).validate().is_err());
        assert!(SessionsConfig::new().with_consolidation_threshold(f64::NAN).validate().is_err());
        assert!(SessionsConfig::new().with_max_summaries(0).validate().is_err());
    }
}
