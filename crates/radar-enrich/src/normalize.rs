//! Text normalization shared by category lookup and brand matching.

/// Terminal punctuation stripped from the end of a question.
const TRAILING_PUNCTUATION: &[char] = &['?', '!', '.', ',', ';', ':'];

/// Canonicalize question text for comparison.
///
/// Trims, strips any trailing run of `?!.,;:` (and spaces between them),
/// then collapses internal whitespace runs to a single space. Case is
/// preserved. Never fails.
#[must_use]
pub fn normalize_question(text: &str) -> String {
    let stripped = text
        .trim()
        .trim_end_matches(|c: char| TRAILING_PUNCTUATION.contains(&c) || c.is_whitespace());
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
