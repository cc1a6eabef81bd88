//! APA 7 reference parser
//!
//! Turns one free-text reference in APA surface form,
//! `Author(s). (Year). Title. <type-specific trailer>`, into a
//! [`ParsedReference`]. Parsing is heuristic:
//! - the author list is read with nom combinators ("Last, F. M." tokens
//!   joined by ", ", " & " or ", & ")
//! - the parenthesized date group yields the year, "(n.d.)" yields none
//! - the title runs to the next terminal period
//! - the trailer is classified and split into fields with regexes

use lazy_static::lazy_static;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{char, one_of, satisfy, space0, space1},
    combinator::{map, not, opt, recognize},
    multi::{many0, separated_list1},
    sequence::{pair, preceded, terminated, tuple},
    IResult,
};
use regex::Regex;

use apa_domain::{ParsedReference, SourceType};

use crate::config::ParserConfig;
use crate::error::ParseError;

lazy_static! {
    // Date groups meaning "no date"
    static ref NO_DATE_REGEX: Regex =
        Regex::new(r"(?i)^(?:n\.?\s*d\.?|in press|forthcoming)$").unwrap();

    static ref DIGITS_REGEX: Regex = Regex::new(r"\d+").unwrap();

    // Corporate author: anything without parentheses before the date group
    static ref GROUP_AUTHOR_REGEX: Regex =
        Regex::new(r"^(?P<name>[^()]+?)\s*\((?P<date>[^()]*)\)").unwrap();

    // End of a sentence: terminal punctuation followed by space or end of text
    static ref TERMINAL_REGEX: Regex = Regex::new(r"[.?!](?:\s|$)").unwrap();

    // Trailing link: URL, doi: form, or bare DOI
    static ref LINK_REGEX: Regex = Regex::new(
        r"(?:^|\s)(?P<link>(?:https?://|doi:)\S+|10\.\d{4,}/\S+)\s*$"
    ).unwrap();

    static ref DOI_LINK_REGEX: Regex = Regex::new(
        r"(?i)^(?:https?://(?:dx\.)?doi\.org/|doi:)?(?P<doi>10\.\d{4,}/\S+)$"
    ).unwrap();

    static ref RETRIEVED_REGEX: Regex = Regex::new(r"(?i)\s*Retrieved from\s*$").unwrap();

    // "In <Editors> (Ed.)" or "In <Book> (pp. ...)"
    static ref CHAPTER_REGEX: Regex =
        Regex::new(r"^In\s+.*?(?:\(Eds?\.\)|\(pp\.\s)").unwrap();

    static ref EDITOR_MARK_REGEX: Regex = Regex::new(r"\s*\(Eds?\.\)").unwrap();

    // ", 45(3)" following a journal name
    static ref VOLUME_MARKER_REGEX: Regex =
        Regex::new(r",\s*[0-9A-Za-z]*\([^()]+\)\s*(?:,|\.?\s*$)").unwrap();

    static ref VOLUME_ISSUE_REGEX: Regex =
        Regex::new(r"^(?P<volume>[0-9A-Za-z]*)\((?P<issue>[^()]+)\)$").unwrap();

    static ref VOLUME_REGEX: Regex = Regex::new(r"^\d+[A-Za-z]?$").unwrap();

    static ref PAGES_REGEX: Regex =
        Regex::new(r"^[A-Za-z]?\d+(?:\s*[-–]\s*[A-Za-z]?\d+)?$").unwrap();

    // A date group shortly after text the author list could not read
    static ref STRAY_DATE_REGEX: Regex = Regex::new(
        r"^[^()]{1,30}?\(\s*(?:\d{4}[a-z]?(?:,[^)]*)?|n\.\s*d\.)\s*\)\."
    ).unwrap();

    // "Location: Publisher"
    static ref PUBLISHER_REGEX: Regex = Regex::new(r"^[^:]+:\s+\S").unwrap();
}

/// Parse a reference, bounding years by the system clock
pub fn parse_reference(raw: &str) -> Result<ParsedReference, ParseError> {
    ReferenceParser::default().parse(raw)
}

/// Reference parser with explicit year bounds
#[derive(Debug, Clone, Default)]
pub struct ReferenceParser {
    config: ParserConfig,
}

/// What a parenthesized group after the authors turned out to be
enum DateGroup {
    Year(i32),
    NoDate,
    NotADate,
}

impl ReferenceParser {
    /// Create a parser from configuration
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse one raw reference
    pub fn parse(&self, raw: &str) -> Result<ParsedReference, ParseError> {
        let result = self.parse_internal(raw.trim());
        match &result {
            Ok(reference) => tracing::debug!(
                source_type = %reference.source_type,
                authors = reference.authors.len(),
                year = ?reference.year,
                "parsed reference"
            ),
            Err(err) => tracing::debug!(reason = err.reason(), "reference parse failed"),
        }
        result
    }

    fn parse_internal(&self, text: &str) -> Result<ParsedReference, ParseError> {
        if text.is_empty() {
            return Err(ParseError::NoAuthorFound);
        }

        let (authors, rest) = match parse_author_list(text) {
            Some((authors, rest)) => {
                let head = rest.trim_start();
                if !head.starts_with('(') && STRAY_DATE_REGEX.is_match(head) {
                    tracing::debug!(unread = head, "author list stopped before the date group");
                    return Err(ParseError::NoAuthorFound);
                }
                (authors, rest)
            }
            None => self.group_author(text)?,
        };

        let (year, rest) = self.date_group(rest)?;
        let (title, trailer) = split_sentence(rest);

        let mut reference = ParsedReference {
            authors,
            year,
            title,
            ..Default::default()
        };
        fill_trailer(&mut reference, trailer);
        Ok(reference)
    }

    /// Author without a comma, accepted only right before a date group
    fn group_author<'a>(&self, text: &'a str) -> Result<(Vec<String>, &'a str), ParseError> {
        let caps = GROUP_AUTHOR_REGEX
            .captures(text)
            .ok_or(ParseError::NoAuthorFound)?;
        let (name_match, date) = match (caps.name("name"), caps.name("date")) {
            (Some(name), Some(date)) => (name, date.as_str()),
            _ => return Err(ParseError::NoAuthorFound),
        };

        let name = name_match.as_str().trim().trim_end_matches('.').trim();
        let plausible = !name.is_empty()
            && !reads_as_sentence(name)
            && name.chars().any(char::is_alphabetic)
            && !name.chars().any(|c| c.is_ascii_digit());
        if !plausible {
            return Err(ParseError::NoAuthorFound);
        }
        if let DateGroup::NotADate = self.classify_date(date)? {
            return Err(ParseError::NoAuthorFound);
        }

        Ok((vec![name.to_string()], &text[name_match.end()..]))
    }

    /// Read an optional "(Year)." group
    fn date_group<'a>(&self, rest: &'a str) -> Result<(Option<i32>, &'a str), ParseError> {
        let rest = rest.trim_start();
        let Some(inner) = rest.strip_prefix('(') else {
            return Ok((None, rest));
        };
        let Some(close) = inner.find(')') else {
            return Ok((None, rest));
        };

        let after = &inner[close + 1..];
        let after = after.strip_prefix('.').unwrap_or(after);
        match self.classify_date(&inner[..close])? {
            DateGroup::Year(year) => Ok((Some(year), after)),
            DateGroup::NoDate => Ok((None, after)),
            DateGroup::NotADate => Ok((None, rest)),
        }
    }

    fn classify_date(&self, content: &str) -> Result<DateGroup, ParseError> {
        let content = content.trim();
        if NO_DATE_REGEX.is_match(content) {
            return Ok(DateGroup::NoDate);
        }
        let Some(digits) = DIGITS_REGEX.find(content) else {
            return Ok(DateGroup::NotADate);
        };

        let invalid = || ParseError::InvalidYear(content.to_string());
        if digits.as_str().len() != 4 {
            return Err(invalid());
        }
        let year: i32 = digits.as_str().parse().map_err(|_| invalid())?;
        if year < self.config.min_year() || year > self.config.max_year() {
            return Err(invalid());
        }
        Ok(DateGroup::Year(year))
    }
}

/// Parse a leading "Last, F. M." author list.
///
/// Returns the authors and the unparsed remainder, or `None` when the input
/// does not start with an author token.
pub fn parse_author_list(input: &str) -> Option<(Vec<String>, &str)> {
    author_list(input).ok().map(|(rest, authors)| (authors, rest))
}

fn author_list(input: &str) -> IResult<&str, Vec<String>> {
    separated_list1(author_separator, author)(input)
}

fn author(input: &str) -> IResult<&str, String> {
    map(
        tuple((
            surname,
            space0,
            char(','),
            space0,
            initials,
            opt(preceded(tuple((space0, char(','), space0)), name_suffix)),
        )),
        |(last, _, _, _, initials, suffix)| match suffix {
            Some(suffix) => format!("{}, {}, {}", last.trim_end(), initials, suffix),
            None => format!("{}, {}", last.trim_end(), initials),
        },
    )(input)
}

/// "Jr.", "Sr.", "II", "III", "IV"
fn name_suffix(input: &str) -> IResult<&str, &str> {
    terminated(
        alt((tag("Jr."), tag("Sr."), tag("III"), tag("II"), tag("IV"))),
        not(satisfy(|c: char| c.is_alphanumeric())),
    )(input)
}

fn surname(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_alphabetic()),
        take_while(|c: char| c.is_alphabetic() || matches!(c, ' ' | '-' | '\'' | '’')),
    ))(input)
}

/// "J.", "J. A.", "J.-P.", "Ch."
fn initials(input: &str) -> IResult<&str, &str> {
    recognize(pair(initial, many0(preceded(opt(one_of("- ")), initial))))(input)
}

fn initial(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        satisfy(|c: char| c.is_uppercase()),
        opt(satisfy(|c: char| c.is_lowercase())),
        char('.'),
    )))(input)
}

fn author_separator(input: &str) -> IResult<&str, &str> {
    alt((
        recognize(tuple((space0, char(','), space0, char('&'), space0))),
        recognize(tuple((space0, char(','), space0, tag("and"), space1))),
        recognize(tuple((space0, char('&'), space0))),
        recognize(tuple((space1, tag("and"), space1))),
        recognize(pair(char(','), space0)),
    ))(input)
}

/// Split off the first sentence. "?" and "!" stay with the sentence, a
/// terminal period does not.
fn split_sentence(text: &str) -> (Option<String>, &str) {
    let text = text.trim();
    match TERMINAL_REGEX.find(text) {
        Some(m) => {
            let end = if text[m.start()..].starts_with('.') {
                m.start()
            } else {
                m.start() + 1
            };
            (non_empty(&text[..end]), text[m.end()..].trim())
        }
        None => (non_empty(text), ""),
    }
}

fn fill_trailer(reference: &mut ParsedReference, trailer: &str) {
    let (body, link) = split_link(trailer);
    let doi = link.and_then(doi_from_link);
    let url = match (&doi, link) {
        (None, Some(link)) => Some(link.trim_end_matches('.').to_string()),
        _ => None,
    };
    let body = RETRIEVED_REGEX.replace(body, "");
    let body = body.trim();

    let source_type = classify(body, doi.is_some(), url.is_some());
    reference.source_type = source_type;
    reference.doi = doi;
    reference.url = url;

    match source_type {
        SourceType::Book => fill_book(reference, body),
        SourceType::Article => fill_article(reference, body),
        SourceType::Web => {
            reference.site_name = non_empty(body.trim_end_matches('.'));
        }
        SourceType::Chapter => fill_chapter(reference, body),
    }
}

/// Trailer heuristics, most specific first
fn classify(body: &str, has_doi: bool, has_url: bool) -> SourceType {
    if CHAPTER_REGEX.is_match(body) {
        SourceType::Chapter
    } else if has_doi || VOLUME_MARKER_REGEX.is_match(body) {
        SourceType::Article
    } else if has_url {
        SourceType::Web
    } else {
        SourceType::Book
    }
}

fn split_link(trailer: &str) -> (&str, Option<&str>) {
    match LINK_REGEX.captures(trailer).and_then(|caps| caps.name("link")) {
        Some(link) => (trailer[..link.start()].trim(), Some(link.as_str())),
        None => (trailer.trim(), None),
    }
}

fn doi_from_link(link: &str) -> Option<String> {
    DOI_LINK_REGEX
        .captures(link)
        .and_then(|caps| caps.name("doi"))
        .map(|doi| doi.as_str().trim_end_matches('.').to_string())
}

fn fill_book(reference: &mut ParsedReference, body: &str) {
    let body = body.trim_end_matches('.').trim();
    if PUBLISHER_REGEX.is_match(body) {
        if let Some((location, publisher)) = body.split_once(':') {
            reference.location = non_empty(location);
            reference.publisher = non_empty(publisher);
            return;
        }
    }
    reference.publisher = non_empty(body);
}

/// "Source, Volume(Issue), Pages", read from the right
fn fill_article(reference: &mut ParsedReference, body: &str) {
    let body = body.trim_end_matches('.').trim();
    let mut parts: Vec<&str> = body.split(',').map(str::trim).collect();

    if parts.len() > 1 {
        let last = parts[parts.len() - 1];
        if let Some(caps) = VOLUME_ISSUE_REGEX.captures(last) {
            reference.volume = non_empty(&caps["volume"]);
            reference.issue = non_empty(&caps["issue"]);
            parts.pop();
        } else if PAGES_REGEX.is_match(last) {
            reference.pages = Some(last.to_string());
            parts.pop();

            if parts.len() > 1 {
                let last = parts[parts.len() - 1];
                if let Some(caps) = VOLUME_ISSUE_REGEX.captures(last) {
                    reference.volume = non_empty(&caps["volume"]);
                    reference.issue = non_empty(&caps["issue"]);
                    parts.pop();
                } else if VOLUME_REGEX.is_match(last) {
                    reference.volume = Some(last.to_string());
                    parts.pop();
                }
            }
        }
    }

    reference.source = non_empty(&parts.join(", "));
}

/// "In Editors (Ed.), Book Title (pp. Pages). Publisher."
fn fill_chapter(reference: &mut ParsedReference, body: &str) {
    let Some(clause) = body.strip_prefix("In") else {
        return;
    };
    let clause = clause.trim_start();

    let rest = match EDITOR_MARK_REGEX.find(clause) {
        Some(mark) => {
            let editors = clause[..mark.start()].trim();
            reference.editors = match parse_author_list(editors) {
                Some((names, remainder)) if remainder.trim().is_empty() => names,
                _ => vec![editors.to_string()],
            };
            clause[mark.end()..].trim_start()
        }
        None => clause,
    };

    let rest = if let Some(stripped) = rest.strip_prefix(',') {
        stripped.trim_start()
    } else if let Some(stripped) = rest.strip_prefix('.') {
        // no book title: the clause ended right after the editors
        reference.publisher = non_empty(stripped.trim().trim_end_matches('.'));
        return;
    } else {
        rest
    };

    let after = match rest.find("(pp.") {
        Some(pp_start) => {
            reference.book_title = non_empty(&rest[..pp_start]);
            let pages = &rest[pp_start + "(pp.".len()..];
            match pages.find(')') {
                Some(close) => {
                    reference.pages = non_empty(&pages[..close]);
                    pages[close + 1..].trim_start().trim_start_matches('.')
                }
                None => {
                    reference.pages = non_empty(pages);
                    ""
                }
            }
        }
        None => {
            let (book_title, after) = split_sentence(rest);
            reference.book_title = book_title;
            after
        }
    };

    reference.publisher = non_empty(after.trim().trim_end_matches('.'));
}

/// True when a group-author candidate contains a finished sentence, i.e. a
/// ". " boundary right after a lowercase word. Abbreviations such as "U.S."
/// do not count.
fn reads_as_sentence(name: &str) -> bool {
    let mut segments: Vec<&str> = name.split(". ").collect();
    segments.pop();
    segments.iter().any(|segment| {
        segment
            .split_whitespace()
            .last()
            .and_then(|word| word.chars().next())
            .map_or(false, char::is_lowercase)
    })
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> ReferenceParser {
        ReferenceParser::new(ParserConfig::pinned(2024))
    }

    #[test]
    fn test_author_list_forms() {
        let (authors, rest) = parse_author_list("Smith, J. A. (2020)").unwrap();
        assert_eq!(authors, vec!["Smith, J. A."]);
        assert_eq!(rest, " (2020)");

        let (authors, _) = parse_author_list("Smith, J., & Jones, M. (2020)").unwrap();
        assert_eq!(authors, vec!["Smith, J.", "Jones, M."]);

        let (authors, _) = parse_author_list("Smith, J. & Jones, M.").unwrap();
        assert_eq!(authors, vec!["Smith, J.", "Jones, M."]);

        let (authors, _) =
            parse_author_list("Smith, J., Jones, M., & Brown, K. L. (2019)").unwrap();
        assert_eq!(authors, vec!["Smith, J.", "Jones, M.", "Brown, K. L."]);
    }

    #[test]
    fn test_author_list_particles_and_hyphens() {
        let (authors, _) = parse_author_list("van der Berg, J.-P., & O'Brien, Ch.").unwrap();
        assert_eq!(authors, vec!["van der Berg, J.-P.", "O'Brien, Ch."]);
    }

    #[test]
    fn test_author_list_requires_initials() {
        assert!(parse_author_list("Introduction to psychology").is_none());
        assert!(parse_author_list("(2020). Title.").is_none());
    }

    #[test]
    fn test_split_sentence() {
        assert_eq!(
            split_sentence("A title. Rest here."),
            (Some("A title".to_string()), "Rest here.")
        );
        assert_eq!(
            split_sentence("Why now? Rest."),
            (Some("Why now?".to_string()), "Rest.")
        );
        assert_eq!(split_sentence("Only title."), (Some("Only title".to_string()), ""));
        assert_eq!(split_sentence(""), (None, ""));
    }

    #[test]
    fn test_date_variants() {
        let p = parser();
        assert_eq!(p.parse("Smith, J. (2020a). T.").unwrap().year, Some(2020));
        assert_eq!(p.parse("Smith, J. (2020, March 3). T.").unwrap().year, Some(2020));
        assert_eq!(p.parse("Smith, J. (n.d.). T.").unwrap().year, None);
        assert_eq!(p.parse("Smith, J. (in press). T.").unwrap().year, None);
        assert_eq!(p.parse("Smith, J. Title here. Publisher.").unwrap().year, None);
    }

    #[test]
    fn test_year_bounds() {
        let p = parser();
        assert_eq!(p.parse("Smith, J. (2025). T.").unwrap().year, Some(2025));
        assert_eq!(
            p.parse("Smith, J. (2026). T.").unwrap_err(),
            ParseError::InvalidYear("2026".to_string())
        );
        assert!(matches!(
            p.parse("Smith, J. (999). T."),
            Err(ParseError::InvalidYear(_))
        ));
        assert!(matches!(
            p.parse("Smith, J. (20201). T."),
            Err(ParseError::InvalidYear(_))
        ));
    }

    #[test]
    fn test_group_author() {
        let reference = parser()
            .parse("World Health Organization. (2020). Global report. WHO Press.")
            .unwrap();
        assert_eq!(reference.authors, vec!["World Health Organization"]);
        assert_eq!(reference.year, Some(2020));
        assert_eq!(reference.publisher.as_deref(), Some("WHO Press"));
    }

    #[test]
    fn test_no_author() {
        let p = parser();
        assert_eq!(p.parse("").unwrap_err(), ParseError::NoAuthorFound);
        assert_eq!(p.parse("(2020). Title.").unwrap_err(), ParseError::NoAuthorFound);
        assert_eq!(
            p.parse("12345 (2020). Title.").unwrap_err(),
            ParseError::NoAuthorFound
        );
        assert_eq!(
            p.parse("just some words without structure").unwrap_err(),
            ParseError::NoAuthorFound
        );
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("In Brown, A. (Ed.), Book", false, false), SourceType::Chapter);
        assert_eq!(classify("Journal", true, false), SourceType::Article);
        assert_eq!(classify("Journal, 4(2), 1-9.", false, true), SourceType::Article);
        assert_eq!(classify("Site.", false, true), SourceType::Web);
        assert_eq!(classify("Psychology Today: Blog.", false, true), SourceType::Web);
        assert_eq!(classify("Boston: Press.", false, false), SourceType::Book);
        assert_eq!(classify("Press.", false, false), SourceType::Book);
    }

    #[test]
    fn test_name_suffix() {
        let (authors, rest) = parse_author_list("Smith, J., Jr., & Jones, M., III (2020)").unwrap();
        assert_eq!(authors, vec!["Smith, J., Jr.", "Jones, M., III"]);
        assert_eq!(rest, " (2020)");

        // a surname starting like a suffix is the next author
        let (authors, _) = parse_author_list("Smith, J., Ivanov, K.").unwrap();
        assert_eq!(authors, vec!["Smith, J.", "Ivanov, K."]);
    }

    #[test]
    fn test_reads_as_sentence() {
        assert!(!reads_as_sentence("U.S. Census Bureau"));
        assert!(!reads_as_sentence("World Health Organization"));
        assert!(reads_as_sentence("Some loose words. More text"));
    }

    #[test]
    fn test_bare_and_prefixed_doi() {
        let p = parser();
        let bare = p.parse("Smith, J. (2020). T. Journal, 1(2), 3-4. 10.1234/abc").unwrap();
        assert_eq!(bare.doi.as_deref(), Some("10.1234/abc"));

        let prefixed = p.parse("Smith, J. (2020). T. Journal. doi:10.1234/abc").unwrap();
        assert_eq!(prefixed.source_type, SourceType::Article);
        assert_eq!(prefixed.doi.as_deref(), Some("10.1234/abc"));
        assert_eq!(prefixed.source.as_deref(), Some("Journal"));
    }
}
