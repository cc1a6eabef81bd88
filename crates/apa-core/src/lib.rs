//! APA 7 reference engine
//!
//! This crate parses, formats and cross-checks bibliographic references in
//! APA 7th edition style.
//!
//! Features:
//! - Nom-based parser from free-text references to structured records
//! - In-text citation rendering with the APA author-count rules
//! - Reference-list rendering as plain text, HTML or LaTeX with a shared
//!   hanging indent
//! - Coherence validation between a document's citations and its reference list
//!
//! Every operation is a pure function of its inputs.

pub mod citation;
pub mod coherence;
pub mod config;
mod encoding;
pub mod error;
pub mod formatter;
pub mod parser;

pub use citation::{citation_for, citation_key, format_citation, year_label};
pub use coherence::validate_coherence;
pub use config::{ApaConfig, OutputConfig, ParserConfig};
pub use encoding::{Encoding, HANGING_INDENT_PT};
pub use error::{ApaError, ConfigError, FormatError, ParseError, Result};
pub use formatter::{
    doi_link, format_author_list, format_plain_entry, format_reference_list,
    format_reference_list_entry, reference_entry_for, sorted_references,
};
pub use parser::{parse_author_list, parse_reference, ReferenceParser};

// Re-export the domain types so callers need a single dependency
pub use apa_domain::{
    normalize_surname, surname, surname_key, surnames_match, AuthorYear, Citation, CitationData,
    CoherenceIssue, CoherenceReport, CoherenceSummary, ImperfectMatch, IssueKind, Mismatch,
    ParsedReference, ReferenceListEntry, SourceType, UnknownSourceType,
};
