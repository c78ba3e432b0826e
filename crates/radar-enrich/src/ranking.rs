//! Brand ranking by order of first mention.

use std::collections::HashSet;

/// Brands ordered by first appearance in an answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ranking {
    pub brands: Vec<String>,
    /// 1-based rank of the main brand, if it appears.
    pub position: Option<usize>,
}

/// Order the main brand and detected competitors by first occurrence in `text`.
///
/// Occurrences are case-insensitive substring hits. Brands that do not occur
/// are left out. Equal offsets keep insertion order: main brand first, then
/// `detected` in the order given.
#[must_use]
pub fn build_ranking(text: &str, main_brand: &str, detected: &[String]) -> Ranking {
    if text.is_empty() {
        return Ranking::default();
    }

    let haystack = text.to_lowercase();
    let main_lower = main_brand.trim().to_lowercase();
    let mut seen = HashSet::new();
    let mut located: Vec<(usize, &str)> = Vec::new();

    let candidates = std::iter::once(main_brand.trim()).chain(detected.iter().map(String::as_str));
    for brand in candidates {
        let lower = brand.to_lowercase();
        if lower.is_empty() || !seen.insert(lower.clone()) {
            continue;
        }
        // Byte offsets within one string order the same as char offsets.
        if let Some(offset) = haystack.find(&lower) {
            located.push((offset, brand));
        }
    }

    located.sort_by_key(|&(offset, _)| offset);

    let brands: Vec<String> = located.into_iter().map(|(_, b)| b.to_string()).collect();
    let position = if main_lower.is_empty() {
        None
    } else {
        brands
            .iter()
            .position(|b| b.to_lowercase() == main_lower)
            .map(|i| i + 1)
    };

    Ranking { brands, position }
}
