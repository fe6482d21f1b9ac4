//! List-field parsers – turn the free-text skills / certifications /
//! languages fields into ordered sequences of non-empty strings.
//!
//! Both parsers are pure and total over every string input.

/// Split comma-delimited text into trimmed, non-empty items in input order.
pub fn parse_comma_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split newline-delimited text into non-blank lines in input order.
///
/// Trimming is applied only for the blank-line test; retained lines keep
/// their original surrounding whitespace. Saved documents depend on this
/// exact shape, so the asymmetry must not be "fixed".
pub fn parse_line_list(text: &str) -> Vec<String> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
