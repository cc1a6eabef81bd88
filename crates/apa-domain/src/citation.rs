//! In-text citations and reference-list entries
//!
//! The two loosely-coupled halves of a document's bibliography. A citation
//! and a reference-list entry correspond when their keys are equal.

use serde::{Deserialize, Serialize};

use crate::{CitationData, ParsedReference};

/// An in-text citation occurring in a document body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    /// Key correlating the citation to a reference (e.g. "[Smith, 2020]")
    pub citation_key: String,

    /// Literal rendering in the document (e.g. "Smith (2020) states...")
    #[serde(default)]
    pub citation_text: String,

    /// Authors and year used for matching
    #[serde(default)]
    pub parsed: CitationData,
}

impl Citation {
    /// Create a new citation
    pub fn new(
        citation_key: impl Into<String>,
        citation_text: impl Into<String>,
        parsed: CitationData,
    ) -> Self {
        Self {
            citation_key: citation_key.into(),
            citation_text: citation_text.into(),
            parsed,
        }
    }
}

/// One item of a document's reference list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceListEntry {
    /// Key in the same key space as [`Citation::citation_key`]
    pub ref_key: String,

    /// Literal rendered reference-list line
    #[serde(default)]
    pub ref_text: String,

    /// Full structured reference
    #[serde(default)]
    pub parsed: ParsedReference,
}

impl ReferenceListEntry {
    /// Create a new reference-list entry
    pub fn new(
        ref_key: impl Into<String>,
        ref_text: impl Into<String>,
        parsed: ParsedReference,
    ) -> Self {
        Self {
            ref_key: ref_key.into(),
            ref_text: ref_text.into(),
            parsed,
        }
    }
}
