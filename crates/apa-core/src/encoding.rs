//! Output encodings for reference-list entries
//!
//! Each encoding expresses the APA hanging indent (first line flush,
//! continuation lines indented) in its own way, always with the same
//! magnitude.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ApaError;

/// Hanging-indent magnitude in points (0.5 in), shared by every encoding
pub const HANGING_INDENT_PT: u32 = 36;

/// Output encoding of a formatted reference list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Plain text; the entry is prefixed with a single tab
    #[default]
    Text,
    /// A `<p>` block with negative first-line indent and matching padding
    Html,
    /// The entry is prefixed with a `\hangindent` directive
    Latex,
}

impl Encoding {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
            Self::Latex => "latex",
        }
    }

    /// Separator placed between entries of a full list.
    ///
    /// LaTeX uses a blank line because `\hangindent` applies per paragraph.
    pub fn separator(&self) -> &'static str {
        match self {
            Self::Text | Self::Html => "\n",
            Self::Latex => "\n\n",
        }
    }

    /// Escape characters that are special in this encoding
    pub fn escape(&self, text: &str) -> String {
        match self {
            Self::Text => text.to_string(),
            Self::Html => escape_html(text),
            Self::Latex => escape_latex(text),
        }
    }

    /// Wrap an already-escaped entry in this encoding's hanging indent
    pub fn hanging_indent(&self, entry: &str) -> String {
        match self {
            Self::Text => format!("\t{}", entry),
            Self::Html => format!(
                "<p style=\"padding-left: {pt}pt; text-indent: -{pt}pt;\">{entry}</p>",
                pt = HANGING_INDENT_PT,
                entry = entry
            ),
            Self::Latex => format!(
                "\\hangindent={}pt\\hangafter=1\\noindent {}",
                HANGING_INDENT_PT, entry
            ),
        }
    }

    /// Escape and indent a plain rendered entry
    pub fn render(&self, plain_entry: &str) -> String {
        self.hanging_indent(&self.escape(plain_entry))
    }
}

impl FromStr for Encoding {
    type Err = ApaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" | "plain" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            "latex" | "tex" => Ok(Self::Latex),
            _ => Err(ApaError::UnknownEncoding(s.to_string())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

fn escape_latex(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '#' | '$' | '%' | '&' | '_' | '{' | '}' => {
                result.push('\\');
                result.push(c);
            }
            '\\' => result.push_str("\\textbackslash{}"),
            '~' => result.push_str("\\textasciitilde{}"),
            '^' => result.push_str("\\textasciicircum{}"),
            _ => result.push(c),
        }
    }
    result
}
