//! Source type classification

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kind of bibliographic source a reference describes.
///
/// The set is closed: every reference is formatted with exactly one of the
/// four APA templates. `"web"` is the canonical tag; `"website"` and
/// `"online"` are accepted on input only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Book,
    Article,
    #[serde(alias = "website", alias = "online")]
    Web,
    Chapter,
}

/// Returned when a source type tag is not recognized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown source type: {0}")]
pub struct UnknownSourceType(pub String);

impl SourceType {
    /// All variants, in template order
    pub const ALL: [SourceType; 4] = [
        SourceType::Book,
        SourceType::Article,
        SourceType::Web,
        SourceType::Chapter,
    ];

    /// Canonical lowercase tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Article => "article",
            Self::Web => "web",
            Self::Chapter => "chapter",
        }
    }
}

impl FromStr for SourceType {
    type Err = UnknownSourceType;

    /// Parse a source type tag (case-insensitive, aliases accepted)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        match tag.as_str() {
            "journal" => Ok(Self::Article),
            "website" | "online" => Ok(Self::Web),
            _ => Self::ALL
                .into_iter()
                .find(|source_type| source_type.as_str() == tag)
                .ok_or_else(|| UnknownSourceType(s.to_string())),
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
