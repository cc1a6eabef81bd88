//! Structured bibliographic references

use serde::{Deserialize, Serialize};

use crate::{surname, SourceType};

/// Anything that carries an ordered author list and an optional year.
///
/// In-text citations and coherence matching only look at this subset, so
/// they accept either a full [`ParsedReference`] or a bare [`CitationData`].
pub trait AuthorYear {
    /// Authors in "Last, F. M." form, in authorship order
    fn authors(&self) -> &[String];

    /// Publication year; `None` renders as "n.d."
    fn year(&self) -> Option<i32>;

    /// Surname of the first author, if any
    fn first_author_surname(&self) -> Option<&str> {
        self.authors().first().map(|a| surname(a))
    }
}

/// One bibliographic source in structured form.
///
/// Which optional fields matter depends on `source_type`:
/// - book: `publisher`, `location`
/// - article: `source` (journal name), `volume`, `issue`, `pages`, `doi`, `url`
/// - web: `site_name`, `url`
/// - chapter: `editors`, `book_title`, `pages`, `publisher`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedReference {
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, alias = "type")]
    pub source_type: SourceType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "journal")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub editors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_title: Option<String>,
}

impl ParsedReference {
    /// Create an empty reference of the given type
    pub fn new(source_type: SourceType) -> Self {
        Self {
            source_type,
            ..Default::default()
        }
    }

    /// Builder: set the author list
    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set year
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Builder: set title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder: set publisher
    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    /// Builder: set publisher location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder: set journal name
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Builder: set volume
    pub fn with_volume(mut self, volume: impl Into<String>) -> Self {
        self.volume = Some(volume.into());
        self
    }

    /// Builder: set issue
    pub fn with_issue(mut self, issue: impl Into<String>) -> Self {
        self.issue = Some(issue.into());
        self
    }

    /// Builder: set page range
    pub fn with_pages(mut self, pages: impl Into<String>) -> Self {
        self.pages = Some(pages.into());
        self
    }

    /// Builder: set DOI (bare, without the resolver prefix)
    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = Some(doi.into());
        self
    }

    /// Builder: set site name
    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = Some(site_name.into());
        self
    }

    /// Builder: set URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Builder: set the editor list
    pub fn with_editors<I, S>(mut self, editors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.editors = editors.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set the containing book title
    pub fn with_book_title(mut self, book_title: impl Into<String>) -> Self {
        self.book_title = Some(book_title.into());
        self
    }

    /// The `{authors, year}` subset used for in-text citations and matching
    pub fn citation_data(&self) -> CitationData {
        CitationData::from(self)
    }
}

impl AuthorYear for ParsedReference {
    fn authors(&self) -> &[String] {
        &self.authors
    }

    fn year(&self) -> Option<i32> {
        self.year
    }
}

/// The `{authors, year}` subset of a reference
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationData {
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

impl CitationData {
    /// Create citation data from authors and an optional year
    pub fn new<I, S>(authors: I, year: Option<i32>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            authors: authors.into_iter().map(Into::into).collect(),
            year,
        }
    }
}

impl From<&ParsedReference> for CitationData {
    fn from(reference: &ParsedReference) -> Self {
        Self {
            authors: reference.authors.clone(),
            year: reference.year,
        }
    }
}

impl AuthorYear for CitationData {
    fn authors(&self) -> &[String] {
        &self.authors
    }

    fn year(&self) -> Option<i32> {
        self.year
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let reference = ParsedReference::new(SourceType::Article)
            .with_authors(["Smith, J.", "Jones, M."])
            .with_year(2020)
            .with_source("Nature");

        assert_eq!(reference.authors, vec!["Smith, J.", "Jones, M."]);
        assert_eq!(reference.first_author_surname(), Some("Smith"));
        assert_eq!(reference.citation_data().year, Some(2020));
    }

    #[test]
    fn test_json_uses_camel_case() {
        let reference = ParsedReference::new(SourceType::Web)
            .with_authors(["Doe, J."])
            .with_site_name("Example")
            .with_url("https://example.org");
        let json = serde_json::to_value(&reference).unwrap();

        assert_eq!(json["sourceType"], "web");
        assert_eq!(json["siteName"], "Example");
        assert!(json.get("year").is_none());
        assert!(json.get("editors").is_none());
    }

    #[test]
    fn test_json_accepts_legacy_keys() {
        let json = r#"{"authors":["Smith, J."],"year":2020,"type":"website","url":"https://a.b"}"#;
        let reference: ParsedReference = serde_json::from_str(json).unwrap();
        assert_eq!(reference.source_type, SourceType::Web);
        assert_eq!(reference.year, Some(2020));
    }
}
