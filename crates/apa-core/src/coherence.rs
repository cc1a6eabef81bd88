//! Citation / reference-list coherence validation

use std::collections::HashMap;

use apa_domain::{
    surnames_match, Citation, CoherenceReport, ImperfectMatch, Mismatch, ReferenceListEntry,
};

/// Records indexed by key, in first-seen key order.
///
/// A repeated key replaces the earlier record but keeps its position.
struct KeyedIndex<'a, T> {
    order: Vec<&'a str>,
    records: HashMap<&'a str, &'a T>,
}

impl<'a, T> KeyedIndex<'a, T> {
    fn build(items: &'a [T], key_of: impl Fn(&T) -> &str, label: &str) -> Self {
        let mut order = Vec::with_capacity(items.len());
        let mut records = HashMap::with_capacity(items.len());

        for item in items {
            let key = key_of(item);
            if key.trim().is_empty() {
                tracing::warn!(kind = label, "ignoring record with blank key");
                continue;
            }
            if records.insert(key, item).is_none() {
                order.push(key);
            } else {
                tracing::debug!(kind = label, key, "duplicate key, keeping last record");
            }
        }

        Self { order, records }
    }

    fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    fn iter(&self) -> impl Iterator<Item = (&'a str, &'a T)> + '_ {
        self.order
            .iter()
            .filter_map(|key| self.records.get(key).map(|record| (*key, *record)))
    }
}

/// Match citations against reference-list entries by key.
///
/// Pure function of its inputs. Each report list follows the order in which
/// keys first appear in the respective input collection.
pub fn validate_coherence(
    citations: &[Citation],
    references: &[ReferenceListEntry],
) -> CoherenceReport {
    let citation_index = KeyedIndex::build(citations, |c| c.citation_key.as_str(), "citation");
    let reference_index = KeyedIndex::build(references, |r| r.ref_key.as_str(), "reference");

    let mut report = CoherenceReport::default();

    for (key, citation) in citation_index.iter() {
        match reference_index.records.get(key) {
            None => report.citations_without_reference.push(citation.clone()),
            Some(reference) => {
                if let Some(imperfect) = compare(key, citation, reference) {
                    report.imperfect_matches.push(imperfect);
                }
            }
        }
    }

    report.references_without_citations = reference_index
        .iter()
        .filter(|(key, _)| !citation_index.contains(key))
        .map(|(_, reference)| reference.clone())
        .collect();

    tracing::debug!(
        citations = citations.len(),
        references = references.len(),
        missing_references = report.citations_without_reference.len(),
        missing_citations = report.references_without_citations.len(),
        imperfect = report.imperfect_matches.len(),
        "validated coherence"
    );

    report
}

/// Compare surnames (ordered, case-insensitive) and years of a keyed pair
fn compare(key: &str, citation: &Citation, reference: &ReferenceListEntry) -> Option<ImperfectMatch> {
    let cited = &citation.parsed;
    let listed = &reference.parsed;

    let authors_differ = !surnames_match(&cited.authors, &listed.authors);
    let year_differs = cited.year != listed.year;

    Mismatch::from_flags(authors_differ, year_differs).map(|mismatch| ImperfectMatch {
        key: key.to_string(),
        citation_text: citation.citation_text.clone(),
        ref_text: reference.ref_text.clone(),
        citation_authors: cited.authors.clone(),
        reference_authors: listed.authors.clone(),
        citation_year: cited.year,
        reference_year: listed.year,
        mismatch,
    })
}
