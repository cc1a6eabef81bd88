//! Citation / reference-list coherence results

use serde::{Deserialize, Serialize};

use crate::{Citation, ReferenceListEntry};

/// Which part of a keyed citation/reference pair disagrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mismatch {
    Authors,
    Year,
    AuthorsAndYear,
}

impl Mismatch {
    /// Classify a comparison outcome; `None` when both sides agree
    pub fn from_flags(authors_differ: bool, year_differs: bool) -> Option<Self> {
        match (authors_differ, year_differs) {
            (false, false) => None,
            (true, false) => Some(Self::Authors),
            (false, true) => Some(Self::Year),
            (true, true) => Some(Self::AuthorsAndYear),
        }
    }
}

/// A citation and a reference that share a key but not their data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImperfectMatch {
    pub key: String,
    pub citation_text: String,
    pub ref_text: String,
    pub citation_authors: Vec<String>,
    pub reference_authors: Vec<String>,
    pub citation_year: Option<i32>,
    pub reference_year: Option<i32>,
    pub mismatch: Mismatch,
}

impl ImperfectMatch {
    /// Human-readable description
    pub fn issue(&self) -> &'static str {
        IssueKind::ImperfectMatch.description()
    }
}

/// Kind of a flattened coherence issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueKind {
    CitationWithoutReference,
    ReferenceWithoutCitation,
    ImperfectMatch,
}

impl IssueKind {
    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::CitationWithoutReference => "No matching reference found",
            Self::ReferenceWithoutCitation => "No matching citation found",
            Self::ImperfectMatch => "Authors or year mismatch between citation and reference",
        }
    }
}

/// One problem found by coherence validation, flattened for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoherenceIssue {
    pub kind: IssueKind,
    pub key: String,
    pub issue: String,
}

/// Outcome of matching a document's citations against its reference list.
///
/// Each list keeps the iteration order of the collection it was drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoherenceReport {
    pub citations_without_reference: Vec<Citation>,
    pub references_without_citations: Vec<ReferenceListEntry>,
    pub imperfect_matches: Vec<ImperfectMatch>,
}

impl CoherenceReport {
    /// True when no issue of any kind was found
    pub fn is_coherent(&self) -> bool {
        self.citations_without_reference.is_empty()
            && self.references_without_citations.is_empty()
            && self.imperfect_matches.is_empty()
    }

    /// Count summary, given the sizes of the validated collections
    pub fn summary(&self, total_citations: usize, total_references: usize) -> CoherenceSummary {
        CoherenceSummary {
            total_citations,
            total_references,
            citations_without_reference: self.citations_without_reference.len(),
            references_without_citations: self.references_without_citations.len(),
            imperfect_matches: self.imperfect_matches.len(),
        }
    }

    /// All issues as one list: missing references, then missing citations,
    /// then imperfect matches
    pub fn issues(&self) -> Vec<CoherenceIssue> {
        let missing_refs = self.citations_without_reference.iter().map(|c| {
            issue(IssueKind::CitationWithoutReference, &c.citation_key)
        });
        let missing_cites = self
            .references_without_citations
            .iter()
            .map(|r| issue(IssueKind::ReferenceWithoutCitation, &r.ref_key));
        let imperfect = self
            .imperfect_matches
            .iter()
            .map(|m| CoherenceIssue {
                kind: IssueKind::ImperfectMatch,
                key: m.key.clone(),
                issue: m.issue().to_string(),
            });

        missing_refs.chain(missing_cites).chain(imperfect).collect()
    }
}

fn issue(kind: IssueKind, key: &str) -> CoherenceIssue {
    CoherenceIssue {
        kind,
        key: key.to_string(),
        issue: kind.description().to_string(),
    }
}

/// Counts describing a coherence run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoherenceSummary {
    pub total_citations: usize,
    pub total_references: usize,
    pub citations_without_reference: usize,
    pub references_without_citations: usize,
    pub imperfect_matches: usize,
}

impl CoherenceSummary {
    /// True when every count of problems is zero
    pub fn is_coherent(&self) -> bool {
        self.citations_without_reference == 0
            && self.references_without_citations == 0
            && self.imperfect_matches == 0
    }
}
