//! Configuration for apa-core
//!
//! Parser year bounds and the default output encoding. The hanging-indent
//! magnitude is a presentation constant (see [`crate::HANGING_INDENT_PT`])
//! and is not configurable.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::Encoding;

/// Engine-wide configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApaConfig {
    /// Reference parsing settings
    pub parser: ParserConfig,
    /// Output settings
    pub output: OutputConfig,
}

/// Reference parsing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Year treated as "now" when bounding publication years.
    /// `None` reads the system clock on every parse.
    pub reference_year: Option<i32>,
    /// How many years past `reference_year` a publication may be dated
    pub future_year_slack: i32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            reference_year: None,
            future_year_slack: 1,
        }
    }
}

impl ParserConfig {
    /// Configuration pinned to a fixed "current" year
    pub fn pinned(reference_year: i32) -> Self {
        Self {
            reference_year: Some(reference_year),
            ..Self::default()
        }
    }

    /// Earliest accepted publication year
    pub fn min_year(&self) -> i32 {
        1000
    }

    /// Latest accepted publication year
    pub fn max_year(&self) -> i32 {
        let now = self
            .reference_year
            .unwrap_or_else(|| chrono::Local::now().year());
        now + self.future_year_slack
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Encoding used when the caller does not pick one
    pub encoding: Encoding,
}

impl ApaConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> crate::error::Result<Self> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(year) = self.parser.reference_year {
            if !(1000..=9999).contains(&year) {
                return Err(ConfigError::OutOfRange(format!(
                    "reference_year must be a 4-digit year, got {}",
                    year
                )));
            }
        }

        if !(0..=100).contains(&self.parser.future_year_slack) {
            return Err(ConfigError::OutOfRange(format!(
                "future_year_slack must be between 0 and 100, got {}",
                self.parser.future_year_slack
            )));
        }

        Ok(())
    }
}
