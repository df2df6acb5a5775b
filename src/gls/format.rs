//! GLS format constants and directive helpers.

use once_cell::sync::Lazy;
use regex::Regex;

/// Byte-order mark written at the start of every GLS file.
pub const BOM: char = '\u{FEFF}';

/// Separator between headwords on an article's first line.
pub const HEADWORD_SEPARATOR: char = '|';

/// Headwords must be strictly shorter than this many UTF-8 bytes.
pub const HEADWORD_LIMIT: usize = 256;

/// Directive holding the dictionary title.
pub const TITLE_DIRECTIVE: &str = "Glossary title";

/// Directive that closes the directive zone.
pub const SECTION_DIRECTIVE: &str = "Glossary section";

/// Directives that describe StarDict bookkeeping rather than content.
///
/// They are dropped when converting to StarDict, where the values are
/// derived instead. The title is consumed separately.
pub const RESERVED_DIRECTIVES: &[&str] = &[
    "version",
    "Bookname",
    TITLE_DIRECTIVE,
    "Wordcount",
    "Synwordcount",
    "Idxfilesize",
    "Idxoffsetbits",
    "Sametypesequence",
    SECTION_DIRECTIVE,
];

/// `#`-prefixed line with a key, a `:` or `?` separator and a value.
static DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#+\s*(.+?)\s*[:?]\s*(.*)").expect("valid directive regex"));

/// Split a directive line into key and value.
pub fn parse_directive(line: &str) -> Option<(&str, &str)> {
    let caps = DIRECTIVE.captures(line)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Whether a trimmed, non-empty line can start an article.
pub fn is_article_line(line: &str) -> bool {
    line.chars().next().is_some_and(|c| c != '#')
}

/// Split a headword line into its non-empty, trimmed headwords.
pub fn split_headwords(line: &str) -> Vec<String> {
    line.split(HEADWORD_SEPARATOR)
        .map(str::trim)
        .filter(|hw| !hw.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render a metadata key as a GLS directive key.
///
/// `bookname` becomes the title directive; other keys get an upper-cased
/// first letter and spaces for underscores.
pub fn directive_key(key: &str) -> String {
    if key == "bookname" {
        return TITLE_DIRECTIVE.to_string();
    }

    let mut chars = key.chars();
    let rendered: String = match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    };
    rendered.replace('_', " ")
}
