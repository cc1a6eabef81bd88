//! Domain types for APA 7 reference handling
//!
//! This crate provides the value types exchanged with the reference engine:
//! - ParsedReference: one structured bibliographic source
//! - SourceType: the closed set of supported source kinds
//! - Citation / ReferenceListEntry: the two halves of a document's citations
//! - CoherenceReport: the outcome of matching citations against references
//! - Author utilities: surname extraction and normalization

pub mod author;
pub mod citation;
pub mod coherence;
pub mod reference;
pub mod source_type;

pub use author::*;
pub use citation::*;
pub use coherence::*;
pub use reference::*;
pub use source_type::*;
