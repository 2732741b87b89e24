//! # Settings Module
//!
//! ## Purpose
//! Holds the policy knobs of reaction bookkeeping and keeps them in a JSON file
//! (kiform_config.json by default) so that a front end can change them between sessions.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "zero_coefficients": "Reject",
//!   "warn_on_duplicate_rows": true,
//!   "reject_empty_reactions": false,
//!   "default_law": "PowerLaw",
//!   "log_level": "info"
//! }
//! ```
//!
//! ## Usage Pattern
//! ```rust,no_run
//! use KiForm::settings::{Settings, ZeroCoefficientPolicy};
//!
//! let mut settings = Settings::new();
//! settings.set_zero_coefficients(ZeroCoefficientPolicy::Allow);
//! settings.save_config().unwrap();
//! ```

use crate::Kinetics::errors::KineticsResult;
use crate::Kinetics::kinetic_laws::KineticLaw;
use log::{LevelFilter, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "kiform_config.json";

/// what to do with a row whose stoichiometric coefficient is exactly zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZeroCoefficientPolicy {
    /// commit fails with IncompleteReaction
    Reject,
    /// the zero is stored and simply not shown in the reaction string
    Allow,
}

/// Serializable configuration of reaction bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KineticsConfig {
    pub zero_coefficients: ZeroCoefficientPolicy,
    /// log a warning for every component entered in more than one row
    pub warn_on_duplicate_rows: bool,
    /// refuse to commit a reaction without rows
    pub reject_empty_reactions: bool,
    /// law preselected for a new reaction
    pub default_law: KineticLaw,
    /// one of off, error, warn, info, debug, trace
    pub log_level: String,
}

impl Default for KineticsConfig {
    fn default() -> Self {
        Self {
            zero_coefficients: ZeroCoefficientPolicy::Reject,
            warn_on_duplicate_rows: true,
            reject_empty_reactions: false,
            default_law: KineticLaw::PowerLaw,
            log_level: "info".to_string(),
        }
    }
}

impl KineticsConfig {
    /// log_level as a filter for the logger, Info if the string is not recognized
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

/// Configuration together with the file it is stored in.
#[derive(Debug, Clone)]
pub struct Settings {
    config: KineticsConfig,
    config_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Loads kiform_config.json from the current directory, defaults if it is absent or broken.
    pub fn new() -> Self {
        Self::with_config_file(DEFAULT_CONFIG_FILE)
    }

    pub fn with_config_file(config_file: &str) -> Self {
        let config = match Self::load_config(config_file) {
            Ok(config) => config,
            Err(e) => {
                warn!("cannot read {}: {}, using default settings", config_file, e);
                KineticsConfig::default()
            }
        };
        Self {
            config,
            config_file: config_file.to_string(),
        }
    }

    fn load_config(config_file: &str) -> KineticsResult<KineticsConfig> {
        if Path::new(config_file).exists() {
            let content = fs::read_to_string(config_file)?;
            let config: KineticsConfig = serde_json::from_str(&content)?;
            info!("settings loaded from {}", config_file);
            Ok(config)
        } else {
            Ok(KineticsConfig::default())
        }
    }

    /// Writes the configuration as pretty JSON.
    pub fn save_config(&self) -> KineticsResult<()> {
        let content = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.config_file, content)?;
        Ok(())
    }

    pub fn config(&self) -> &KineticsConfig {
        &self.config
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    pub fn set_zero_coefficients(&mut self, policy: ZeroCoefficientPolicy) {
        self.config.zero_coefficients = policy;
    }

    pub fn set_warn_on_duplicate_rows(&mut self, warn: bool) {
        self.config.warn_on_duplicate_rows = warn;
    }

    pub fn set_reject_empty_reactions(&mut self, reject: bool) {
        self.config.reject_empty_reactions = reject;
    }

    pub fn set_default_law(&mut self, law: KineticLaw) {
        self.config.default_law = law;
    }

    pub fn set_log_level(&mut self, level: &str) {
        self.config.log_level = level.to_string();
    }

    pub fn reset_to_defaults(&mut self) {
        self.config = KineticsConfig::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let settings = Settings::with_config_file(path.to_str().unwrap());
        assert_eq!(settings.config(), &KineticsConfig::default());
        assert_eq!(settings.config().level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kiform_config.json");
        let path = path.to_str().unwrap();

        let mut settings = Settings::with_config_file(path);
        settings.set_zero_coefficients(ZeroCoefficientPolicy::Allow);
        settings.set_default_law(KineticLaw::Photocatalytic);
        settings.set_reject_empty_reactions(true);
        settings.set_log_level("debug");
        settings.save_config().unwrap();

        let loaded = Settings::with_config_file(path);
        assert_eq!(loaded.config().zero_coefficients, ZeroCoefficientPolicy::Allow);
        assert_eq!(loaded.config().default_law, KineticLaw::Photocatalytic);
        assert!(loaded.config().reject_empty_reactions);
        assert_eq!(loaded.config().level_filter(), LevelFilter::Debug);

        let mut loaded = loaded;
        loaded.reset_to_defaults();
        assert_eq!(loaded.config(), &KineticsConfig::default());
    }

    #[test]
    fn test_partial_and_broken_files() {
        let dir = tempdir().unwrap();
        let partial = dir.path().join("partial.json");
        fs::write(&partial, r#"{"warn_on_duplicate_rows": false}"#).unwrap();
        let settings = Settings::with_config_file(partial.to_str().unwrap());
        assert!(!settings.config().warn_on_duplicate_rows);
        assert_eq!(settings.config().zero_coefficients, ZeroCoefficientPolicy::Reject);
        assert!(!settings.config().reject_empty_reactions);

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        let settings = Settings::with_config_file(broken.to_str().unwrap());
        assert_eq!(settings.config(), &KineticsConfig::default());
    }
}
