//! Error types for apa-core

use apa_domain::SourceType;
use thiserror::Error;

/// Result type alias for apa-core operations
pub type Result<T> = std::result::Result<T, ApaError>;

/// Umbrella error for callers that drive several engine operations
#[derive(Error, Debug)]
pub enum ApaError {
    /// Raw reference text could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// A reference could not be formatted
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Configuration is invalid or unreadable
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// JSON input or output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config or input file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown output encoding name
    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),
}

/// Raw reference text did not contain a recoverable reference.
///
/// Always recoverable by the caller, e.g. by asking the user to edit the text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No "Last, F." author precedes the year or first sentence boundary
    #[error("no-author-found")]
    NoAuthorFound,

    /// The date group holds digits that are not a plausible 4-digit year
    #[error("invalid-year: {0}")]
    InvalidYear(String),
}

impl ParseError {
    /// Stable machine-readable reason code
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NoAuthorFound => "no-author-found",
            Self::InvalidYear(_) => "invalid-year",
        }
    }
}

/// A reference lacks a field its source type cannot be rendered without
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("missing-required-field: {source_type} reference requires {field}")]
    MissingRequiredField {
        source_type: SourceType,
        field: &'static str,
    },
}

impl FormatError {
    /// Stable machine-readable reason code
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingRequiredField { .. } => "missing-required-field",
        }
    }
}

/// Configuration validation or loading error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// TOML could not be read
    #[error("Invalid TOML: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Toml(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_codes() {
        assert_eq!(ParseError::NoAuthorFound.reason(), "no-author-found");
        assert_eq!(
            ParseError::InvalidYear("999".into()).reason(),
            "invalid-year"
        );

        let err = FormatError::MissingRequiredField {
            source_type: SourceType::Article,
            field: "source",
        };
        assert_eq!(err.reason(), "missing-required-field");
        assert_eq!(
            err.to_string(),
            "missing-required-field: article reference requires source"
        );
    }

    #[test]
    fn test_umbrella_conversion() {
        let err: ApaError = ParseError::NoAuthorFound.into();
        assert!(matches!(err, ApaError::Parse(ParseError::NoAuthorFound)));
        assert_eq!(err.to_string(), "Parse error: no-author-found");
    }
}
