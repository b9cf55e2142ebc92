//! Runtime configuration.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::packaging::DisplayPrecision;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration value: {0}")]
    Invalid(String),
}

/// Tunables for display and validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RxConfig {
    /// Decimal places for displayed quantities
    pub display: DisplayPrecision,
    /// Slack allowed when comparing requested against available stock
    pub stock_tolerance: f64,
    /// Minimum fuzzy similarity (0.0 - 1.0) for catalog search fallbacks
    pub search_min_similarity: f64,
}

impl Default for RxConfig {
    fn default() -> Self {
        Self {
            display: DisplayPrecision::default(),
            stock_tolerance: 1e-9,
            search_min_similarity: 0.75,
        }
    }
}

impl RxConfig {
    /// Parse configuration from JSON; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = Self::from_json_str(&json)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.stock_tolerance.is_finite() || self.stock_tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "stock_tolerance must be a non-negative number, got {}",
                self.stock_tolerance
            )));
        }
        if !(0.0..=1.0).contains(&self.search_min_similarity) {
            return Err(ConfigError::Invalid(format!(
                "search_min_similarity must be within 0..=1, got {}",
                self.search_min_similarity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RxConfig::default();
        assert_eq!(config.display.unit_decimals, 1);
        assert_eq!(config.display.pack_decimals, 2);
        assert_eq!(config.stock_tolerance, 1e-9);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = RxConfig::from_json_str(r#"{"display": {"pack_decimals": 3}}"#).unwrap();
        assert_eq!(config.display.pack_decimals, 3);
        assert_eq!(config.display.unit_decimals, 1);
        assert_eq!(config.search_min_similarity, 0.75);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            RxConfig::from_json_str(r#"{"stock_tolerance": -1.0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            RxConfig::from_json_str(r#"{"search_min_similarity": 1.5}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            RxConfig::from_json_str("not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"stock_tolerance": 0.001}}"#).unwrap();

        let config = RxConfig::from_file(file.path()).unwrap();
        assert_eq!(config.stock_tolerance, 0.001);
    }

    #[test]
    fn test_from_missing_file() {
        let err = RxConfig::from_file("/nonexistent/clinic-rx.json").unwrap_err();
        assert!(err.to_string().contains("reading config file"));
    }
}
