//! Author name utilities
//!
//! Authors are carried as plain strings in "Last, F. M." form. These helpers
//! pull the surname out of such a string and normalize it for matching.

use unicode_normalization::UnicodeNormalization;

/// Surname of an author token: the text before the first comma.
///
/// Group authors ("World Health Organization") have no comma, so the whole
/// trimmed token is returned.
pub fn surname(author: &str) -> &str {
    match author.find(',') {
        Some(comma_pos) => author[..comma_pos].trim(),
        None => author.trim(),
    }
}

/// Normalize a surname for case-insensitive comparison.
///
/// - Unicode NFC composition, so precomposed and decomposed accents agree
/// - Lowercase
/// - Whitespace collapsed to single spaces
pub fn normalize_surname(name: &str) -> String {
    let composed: String = name.nfc().collect::<String>().to_lowercase();
    collapse_whitespace(&composed).trim().to_string()
}

/// Normalized surname of an author token
pub fn surname_key(author: &str) -> String {
    normalize_surname(surname(author))
}

/// Compare two author sequences by surname, in order, ignoring case.
pub fn surnames_match(left: &[String], right: &[String]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(a, b)| surname_key(a) == surname_key(b))
}

/// Collapse runs of whitespace into a single space.
fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_space = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(c);
            prev_was_space = false;
        }
    }

    result
}
