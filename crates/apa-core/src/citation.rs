//! APA 7 in-text citations
//!
//! | authors | rendering                                   |
//! |---------|---------------------------------------------|
//! | 1       | `(Smith, 2020)`                             |
//! | 2       | `(Smith & Jones, 2020)`                     |
//! | 3-5     | `(Smith, Jones, & Brown, 2020)`             |
//! | 6+      | `(Smith et al., 2020)`                      |
//!
//! A missing year renders as `n.d.` in every row.

use apa_domain::{surname, AuthorYear, Citation, ParsedReference};

/// Label for a publication year, `n.d.` when absent
pub fn year_label(year: Option<i32>) -> String {
    match year {
        Some(year) => year.to_string(),
        None => "n.d.".to_string(),
    }
}

/// Render the parenthetical in-text citation for a reference.
///
/// Author-less data (which the parser never produces) renders as the year
/// alone, e.g. `(2020)` or `(n.d.)`.
pub fn format_citation<R: AuthorYear + ?Sized>(reference: &R) -> String {
    let year = year_label(reference.year());
    let surnames: Vec<&str> = reference.authors().iter().map(|a| surname(a)).collect();

    let names = match surnames.as_slice() {
        [] => return format!("({})", year),
        [only] => only.to_string(),
        [first, second] => format!("{} & {}", first, second),
        [init @ .., last] if surnames.len() <= 5 => {
            format!("{}, & {}", init.join(", "), last)
        }
        [first, ..] => format!("{} et al.", first),
    };

    format!("({}, {})", names, year)
}

/// Key correlating a citation with its reference, e.g. `[Smith, 2020]`
pub fn citation_key<R: AuthorYear + ?Sized>(reference: &R) -> String {
    let name = reference.first_author_surname().unwrap_or("Anonymous");
    format!("[{}, {}]", name, year_label(reference.year()))
}

/// Build the in-text [`Citation`] for a reference
pub fn citation_for(reference: &ParsedReference) -> Citation {
    Citation::new(
        citation_key(reference),
        format_citation(reference),
        reference.citation_data(),
    )
}
