//! APA 7 reference-list formatting
//!
//! Converts [`ParsedReference`] records into reference-list entries. Each
//! source type has one template; optional fields are left out together with
//! their punctuation.
//!
//! - book: `Author(s). (Year). Title. Location: Publisher.`
//! - article: `Author(s). (Year). Title. Source, Volume(Issue), Pages. https://doi.org/DOI`
//! - web: `Author(s). (Year). Title. SiteName. URL`
//! - chapter: `Author(s). (Year). Title. In Editor(s) (Ed.), BookTitle (pp. Pages). Publisher.`

use apa_domain::{surname_key, ParsedReference, ReferenceListEntry, SourceType};

use crate::citation::{citation_key, year_label};
use crate::error::FormatError;
use crate::Encoding;

/// Format a single reference-list entry in the given encoding
pub fn format_reference_list_entry(
    reference: &ParsedReference,
    encoding: Encoding,
) -> Result<String, FormatError> {
    let plain = format_plain_entry(reference)?;
    Ok(encoding.render(&plain))
}

/// Format a complete reference list.
///
/// Entries are sorted by first author surname (case-insensitive), then by
/// year with "n.d." first; ties keep their input order.
pub fn format_reference_list(
    references: &[ParsedReference],
    encoding: Encoding,
) -> Result<String, FormatError> {
    let entries = sorted_references(references)
        .into_iter()
        .map(|reference| format_reference_list_entry(reference, encoding))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(entries.join(encoding.separator()))
}

/// References in reference-list order
pub fn sorted_references(references: &[ParsedReference]) -> Vec<&ParsedReference> {
    let mut sorted: Vec<&ParsedReference> = references.iter().collect();
    sorted.sort_by_key(|reference| {
        let first = reference
            .authors
            .first()
            .map(|author| surname_key(author))
            .unwrap_or_default();
        (first, reference.year)
    });
    sorted
}

/// Render an entry without encoding or indentation
pub fn format_plain_entry(reference: &ParsedReference) -> Result<String, FormatError> {
    check_required_fields(reference)?;

    let mut parts = vec![
        sentence(&format_author_list(&reference.authors)),
        format!("({}).", year_label(reference.year)),
    ];
    if let Some(title) = field(&reference.title) {
        parts.push(sentence(title));
    }

    match reference.source_type {
        SourceType::Book => push_book_trailer(reference, &mut parts),
        SourceType::Article => push_article_trailer(reference, &mut parts),
        SourceType::Web => push_web_trailer(reference, &mut parts),
        SourceType::Chapter => push_chapter_trailer(reference, &mut parts),
    }

    Ok(parts.join(" "))
}

/// Build the [`ReferenceListEntry`] for a reference, keyed like its citation
pub fn reference_entry_for(reference: &ParsedReference) -> Result<ReferenceListEntry, FormatError> {
    Ok(ReferenceListEntry::new(
        citation_key(reference),
        format_plain_entry(reference)?,
        reference.clone(),
    ))
}

/// Join authors for the reference list: serial comma and "&" before the
/// last author, never "et al."
pub fn format_author_list(authors: &[String]) -> String {
    match authors {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{}, & {}", init.join(", "), last),
    }
}

/// DOI as a resolver link, whatever form it was stored in
pub fn doi_link(doi: &str) -> String {
    let bare = doi
        .trim()
        .trim_start_matches("https://doi.org/")
        .trim_start_matches("http://doi.org/")
        .trim_start_matches("https://dx.doi.org/")
        .trim_start_matches("http://dx.doi.org/")
        .trim_start_matches("doi:");
    format!("https://doi.org/{}", bare.trim())
}

fn check_required_fields(reference: &ParsedReference) -> Result<(), FormatError> {
    let source_type = reference.source_type;
    let missing = |field: &'static str| -> Result<(), FormatError> {
        tracing::debug!(%source_type, field, "reference is missing a required field");
        Err(FormatError::MissingRequiredField { source_type, field })
    };

    if reference.authors.iter().all(|a| a.trim().is_empty()) {
        return missing("authors");
    }

    match source_type {
        SourceType::Book | SourceType::Chapter if field(&reference.title).is_none() => {
            missing("title")
        }
        SourceType::Article if field(&reference.source).is_none() => missing("source"),
        SourceType::Web if field(&reference.url).is_none() => missing("url"),
        _ => Ok(()),
    }
}

fn push_book_trailer(reference: &ParsedReference, parts: &mut Vec<String>) {
    match (field(&reference.location), field(&reference.publisher)) {
        (Some(location), Some(publisher)) => {
            parts.push(sentence(&format!("{}: {}", location, publisher)))
        }
        (None, Some(publisher)) => parts.push(sentence(publisher)),
        (Some(location), None) => parts.push(sentence(location)),
        (None, None) => {}
    }
}

fn push_article_trailer(reference: &ParsedReference, parts: &mut Vec<String>) {
    let mut segments: Vec<String> = field(&reference.source).map(String::from).into_iter().collect();

    let volume = field(&reference.volume);
    let issue = field(&reference.issue);
    match (volume, issue) {
        (Some(volume), Some(issue)) => segments.push(format!("{}({})", volume, issue)),
        (Some(volume), None) => segments.push(volume.to_string()),
        (None, Some(issue)) => segments.push(format!("({})", issue)),
        (None, None) => {}
    }
    if let Some(pages) = field(&reference.pages) {
        segments.push(pages.to_string());
    }
    if !segments.is_empty() {
        parts.push(sentence(&segments.join(", ")));
    }

    if let Some(doi) = field(&reference.doi) {
        parts.push(doi_link(doi));
    } else if let Some(url) = field(&reference.url) {
        parts.push(url.to_string());
    }
}

fn push_web_trailer(reference: &ParsedReference, parts: &mut Vec<String>) {
    if let Some(site_name) = field(&reference.site_name) {
        parts.push(sentence(site_name));
    }
    if let Some(url) = field(&reference.url) {
        parts.push(url.to_string());
    }
}

fn push_chapter_trailer(reference: &ParsedReference, parts: &mut Vec<String>) {
    let editors = format_author_list(&reference.editors);
    let mut clause = match (editors.is_empty(), field(&reference.book_title)) {
        (false, Some(book_title)) => format!("In {} (Ed.), {}", editors, book_title),
        (false, None) => format!("In {} (Ed.)", editors),
        (true, Some(book_title)) => format!("In {}", book_title),
        (true, None) => String::new(),
    };

    if let Some(pages) = field(&reference.pages) {
        if !clause.is_empty() {
            clause.push(' ');
        }
        clause.push_str(&format!("(pp. {})", pages));
    }
    if !clause.is_empty() {
        parts.push(sentence(&clause));
    }

    if let Some(publisher) = field(&reference.publisher) {
        parts.push(sentence(publisher));
    }
}

/// Terminate with a period unless the text already ends a sentence
fn sentence(text: &str) -> String {
    let text = text.trim();
    if text.ends_with(['.', '?', '!']) {
        text.to_string()
    } else {
        format!("{}.", text)
    }
}

/// An optional field, treating blank strings as absent
fn field(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
