//! Property tests: parse/format round trips and reference-list ordering

use apa_core::{
    format_plain_entry, format_reference_list_entry, sorted_references, surname_key, Encoding,
    ParsedReference, ParserConfig, ReferenceParser, SourceType,
};
use proptest::prelude::*;

fn parser() -> ReferenceParser {
    ReferenceParser::new(ParserConfig::pinned(2030))
}

fn author() -> impl Strategy<Value = String> {
    ("[A-Z][a-z]{2,9}", "[A-Z]", proptest::option::of("[A-Z]"))
        .prop_map(|(surname, first, middle)| match middle {
            Some(middle) => format!("{}, {}. {}.", surname, first, middle),
            None => format!("{}, {}.", surname, first),
        })
}

fn words() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,8}( [a-z]{2,8}){0,4}(: [A-Z][a-z]{2,8})?"
}

fn name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,8}( [A-Z][a-z]{2,8}){0,2}(: [A-Z][a-z]{2,8}( [a-z]{2,8}){0,2})?"
}

fn url() -> impl Strategy<Value = String> {
    "https://[a-z]{3,10}\\.org/[a-z0-9]{1,8}"
}

fn base() -> impl Strategy<Value = (Vec<String>, Option<i32>, String)> {
    (
        prop::collection::vec(author(), 1..8),
        proptest::option::of(1900..=2024i32),
        words(),
    )
}

fn with_base(
    source_type: SourceType,
    (authors, year, title): (Vec<String>, Option<i32>, String),
) -> ParsedReference {
    let mut reference = ParsedReference::new(source_type)
        .with_authors(authors)
        .with_title(title);
    reference.year = year;
    reference
}

fn book() -> impl Strategy<Value = ParsedReference> {
    (base(), proptest::option::of(name()), proptest::option::of(name())).prop_map(
        |(base, location, publisher)| {
            let mut reference = with_base(SourceType::Book, base);
            reference.location = location;
            reference.publisher = publisher;
            reference
        },
    )
}

fn article() -> impl Strategy<Value = ParsedReference> {
    (
        base(),
        name(),
        proptest::option::of("[1-9][0-9]{0,2}"),
        proptest::option::of("[1-9][0-9]?"),
        proptest::option::of("[1-9][0-9]{0,2}-[1-9][0-9]{0,3}"),
        proptest::option::of("10\\.[0-9]{4}/[a-z0-9]{3,8}"),
        proptest::option::of(url()),
    )
        .prop_map(|(base, source, volume, issue, pages, doi, url)| {
            let mut reference = with_base(SourceType::Article, base).with_source(source);
            reference.volume = volume;
            reference.issue = issue;
            reference.pages = pages;
            reference.doi = doi;
            reference.url = url;
            reference
        })
}

fn web() -> impl Strategy<Value = ParsedReference> {
    (
        base(),
        proptest::option::of(name()),
        url(),
    )
        .prop_map(|(base, site_name, url)| {
            let mut reference = with_base(SourceType::Web, base).with_url(url);
            reference.site_name = site_name;
            reference
        })
}

fn chapter() -> impl Strategy<Value = ParsedReference> {
    (
        base(),
        prop::collection::vec(author(), 0..4),
        proptest::option::of(name()),
        proptest::option::of("[1-9][0-9]{0,2}-[1-9][0-9]{0,3}"),
        proptest::option::of(name()),
    )
        .prop_map(|(base, editors, book_title, pages, publisher)| {
            let mut reference = with_base(SourceType::Chapter, base).with_editors(editors);
            reference.book_title = book_title;
            reference.pages = pages;
            reference.publisher = publisher;
            reference
        })
}

fn any_reference() -> impl Strategy<Value = ParsedReference> {
    prop_oneof![book(), article(), web(), chapter()]
}

fn assert_text_round_trip(reference: &ParsedReference) -> ParsedReference {
    let rendered = format_reference_list_entry(reference, Encoding::Text).unwrap();
    let reparsed = parser().parse(&rendered).unwrap();
    let rerendered = format_reference_list_entry(&reparsed, Encoding::Text).unwrap();
    assert_eq!(rendered, rerendered);
    reparsed
}

#[test]
fn test_web_site_with_colon_keeps_url() {
    let mut reference = ParsedReference::new(SourceType::Web)
        .with_authors(vec!["Doe, J.".to_string()])
        .with_title("Page")
        .with_url("https://example.org/p");
    reference.year = Some(2021);
    reference.site_name = Some("Psychology Today: Blog".to_string());

    let reparsed = assert_text_round_trip(&reference);
    assert_eq!(reparsed.source_type, SourceType::Web);
    assert_eq!(reparsed.site_name.as_deref(), Some("Psychology Today: Blog"));
    assert_eq!(reparsed.url.as_deref(), Some("https://example.org/p"));
}

#[test]
fn test_article_source_with_colon_keeps_url() {
    let mut reference = ParsedReference::new(SourceType::Article)
        .with_authors(vec!["Doe, J.".to_string()])
        .with_title("Findings: A review")
        .with_source("Science: Advances")
        .with_url("https://example.org/a");
    reference.year = Some(2021);

    let reparsed = assert_text_round_trip(&reference);
    assert_eq!(reparsed.url.as_deref(), Some("https://example.org/a"));
    assert_eq!(reparsed.title.as_deref(), Some("Findings: A review"));
}

proptest! {
    #[test]
    fn test_text_render_round_trips(reference in any_reference()) {
        let rendered = format_reference_list_entry(&reference, Encoding::Text).unwrap();
        let reparsed = parser().parse(&rendered).unwrap();
        let rerendered = format_reference_list_entry(&reparsed, Encoding::Text).unwrap();
        prop_assert_eq!(rendered, rerendered);
    }

    #[test]
    fn test_round_trip_preserves_authors_and_year(reference in any_reference()) {
        let rendered = format_plain_entry(&reference).unwrap();
        let reparsed = parser().parse(&rendered).unwrap();
        prop_assert_eq!(&reparsed.authors, &reference.authors);
        prop_assert_eq!(reparsed.year, reference.year);
    }

    #[test]
    fn test_sorted_by_surname_then_year(references in prop::collection::vec(any_reference(), 0..12)) {
        let sorted = sorted_references(&references);
        prop_assert_eq!(sorted.len(), references.len());

        let keys: Vec<(String, Option<i32>)> = sorted
            .iter()
            .map(|r| (surname_key(&r.authors[0]), r.year))
            .collect();
        for pair in keys.windows(2) {
            prop_assert!(pair[0] <= pair[1], "out of order: {:?}", pair);
        }
    }
}
