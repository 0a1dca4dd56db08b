//! Configuration types for Monok

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::context::ContextConfig;
use crate::error::{MonokError, Result};
use crate::sessions::SessionsConfig;

/// Environment variable naming an extra TOML file to layer in
pub const CONFIG_PATH_ENV: &str = "MONOK_CONFIG_PATH";

/// Main configuration for the Monok memory engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonokConfig {
    /// Root directory for per-identity documents
    pub base_path: PathBuf,

    /// Context window pruning and auto-summary
    pub context: ContextConfig,

    /// Session summary retention and similarity thresholds
    pub sessions: SessionsConfig,
}

impl Default for MonokConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("./data/monok"),
            context: ContextConfig::default(),
            sessions: SessionsConfig::default(),
        }
    }
}

impl MonokConfig {
    /// Load configuration from files and environment variables.
    ///
    /// Loads in this order, later sources winning:
    /// 1. Default configuration
    /// 2. `monok.toml` in the working directory
    /// 3. The file named by `MONOK_CONFIG_PATH`
    /// 4. `MONOK_` environment variables (`MONOK_CONTEXT__SUMMARY_THRESHOLD=8`)
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or the result fails validation.
    pub fn load() -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file("monok.toml"));

        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            figment = figment.merge(Toml::file(path));
        }

        let config: MonokConfig = figment
            .merge(Env::prefixed("MONOK_").ignore(&["config_path"]).split("__"))
            .extract()
            .map_err(|e| {
                MonokError::Configuration(format!("Failed to load configuration: {}", e))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or fails validation.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let config: MonokConfig = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .extract()
            .map_err(|e| {
                MonokError::Configuration(format!("Failed to load configuration file: {}", e))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Set the storage root
    pub fn with_base_path(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Set the context configuration
    pub fn with_context(mut self, context: ContextConfig) -> Self {
        self.context = context;
        self
    }

    /// Set the sessions configuration
    pub fn with_sessions(mut self, sessions: SessionsConfig) -> Self {
        self.sessions = sessions;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty base path, zero counts, or thresholds
    /// outside (0, 1).
    pub fn validate(&self) -> Result<()> {
        if self.base_path.as_os_str().is_empty() {
            return Err(MonokError::Configuration(
                "base_path must not be empty".to_string(),
            ));
        }
        self.context.validate()?;
        self.sessions.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = MonokConfig::default();
        assert_eq!(config.base_path, PathBuf::from("./data/monok"));
        assert_eq!(config.context.summary_threshold, 12);
        assert_eq!(config.sessions.max_summaries, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_defaults_without_sources() {
        Jail::expect_with(|_jail| {
            let config = MonokConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config, MonokConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_layers_file_and_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "monok.toml",
                r#"
                base_path = "/srv/monok"

                [context]
                summary_threshold = 8
                messages_to_keep = 10

                [sessions]
                max_summaries = 50
                "#,
            )?;
            jail.set_env("MONOK_CONTEXT__SUMMARY_THRESHOLD", "4");

            let config = MonokConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.base_path, PathBuf::from("/srv/monok"));
            assert_eq!(config.context.summary_threshold, 4);
            assert_eq!(config.context.messages_to_keep, 10);
            assert_eq!(config.context.max_messages_before_prune, 30);
            assert_eq!(config.sessions.max_summaries, 50);
            assert_eq!(config.sessions.deduplication_threshold, 0.7);
            Ok(())
        });
    }

    #[test]
    fn test_config_path_env_overrides_default_file() {
        Jail::expect_with(|jail| {
            jail.create_file("monok.toml", "[sessions]\nmax_summaries = 50\n")?;
            jail.create_file("custom.toml", "[sessions]\nmax_summaries = 7\n")?;
            jail.set_env(CONFIG_PATH_ENV, "custom.toml");

            let config = MonokConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.sessions.max_summaries, 7);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        Jail::expect_with(|jail| {
            jail.create_file("monok.toml", "[sessions]\ndeduplication_threshold = 1.5\n")?;
            assert!(MonokConfig::load().is_err());
            Ok(())
        });
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("monok.toml");
        std::fs::write(&path, "[context]\nrecent_messages_to_always_keep = 4\n").unwrap();

        let config = MonokConfig::from_file(&path).unwrap();
        assert_eq!(config.context.recent_messages_to_always_keep, 4);
        assert_eq!(config.context.summary_threshold, 12);
    }

    #[test]
    fn test_validate_rejects_empty_base_path() {
        let config = MonokConfig::default().with_base_path("");
        assert!(matches!(
            config.validate(),
            Err(MonokError::Configuration(_))
        ));
    }
}
