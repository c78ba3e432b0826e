//! Question → category resolution: exact normalized lookup, then fuzzy.

use std::collections::HashMap;
use std::num::NonZeroU32;

use radar_core::CategorySource;
use similar::TextDiff;

use crate::normalize::normalize_question;

/// Minimum similarity ratio accepted for a non-exact match.
pub const FUZZY_THRESHOLD: f32 = 0.85;

/// Id written for questions that match no category.
pub const UNMATCHED_ID: u32 = 0;
pub const UNMATCHED_NAME: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: NonZeroU32,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Fuzzy,
    None,
}

/// Outcome of resolving one question.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryMatch {
    Exact(Category),
    Fuzzy { category: Category, ratio: f32 },
    Unmatched,
}

impl CategoryMatch {
    #[must_use]
    pub fn category(&self) -> Option<&Category> {
        match self {
            CategoryMatch::Exact(category) | CategoryMatch::Fuzzy { category, .. } => {
                Some(category)
            }
            CategoryMatch::Unmatched => None,
        }
    }

    /// Numeric id for the record store; `0` when unmatched.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.category().map_or(UNMATCHED_ID, |c| c.id.get())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.category().map_or(UNMATCHED_NAME, |c| c.name.as_str())
    }

    #[must_use]
    pub fn matched_by(&self) -> MatchKind {
        match self {
            CategoryMatch::Exact(_) => MatchKind::Exact,
            CategoryMatch::Fuzzy { .. } => MatchKind::Fuzzy,
            CategoryMatch::Unmatched => MatchKind::None,
        }
    }
}

#[derive(Debug, Clone)]
struct IndexEntry {
    /// Lowercased key, precomputed for fuzzy comparison.
    lower: String,
    category: Category,
}

/// Normalized question text → category, in insertion order.
///
/// Built once per run and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    entries: Vec<IndexEntry>,
    by_key: HashMap<String, usize>,
}

impl CategoryIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from every category sheet of a category source.
    #[must_use]
    pub fn from_source(source: &CategorySource) -> Self {
        let mut index = Self::new();
        for (id, sheet) in source.category_sheets() {
            let Some(id) = NonZeroU32::new(id) else {
                continue;
            };
            let name = sheet.category_name();
            for question in sheet.question_cells() {
                index.insert(question, id, name);
            }
        }
        index
    }

    /// Add or replace the mapping for `question` (normalized before storing).
    ///
    /// A replaced key keeps its original insertion slot.
    pub fn insert(&mut self, question: &str, id: NonZeroU32, name: &str) {
        let key = normalize_question(question);
        let entry = IndexEntry {
            lower: key.to_lowercase(),
            category: Category {
                id,
                name: name.to_string(),
            },
        };
        if let Some(&slot) = self.by_key.get(&key) {
            self.entries[slot] = entry;
        } else {
            self.by_key.insert(key, self.entries.len());
            self.entries.push(entry);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of indexed questions per category, ordered by id.
    #[must_use]
    pub fn distribution(&self) -> Vec<(Category, usize)> {
        let mut counts: Vec<(Category, usize)> = Vec::new();
        for entry in &self.entries {
            match counts.iter_mut().find(|(c, _)| *c == entry.category) {
                Some((_, n)) => *n += 1,
                None => counts.push((entry.category.clone(), 1)),
            }
        }
        counts.sort_by(|(a, _), (b, _)| a.id.cmp(&b.id).then_with(|| a.name.cmp(&b.name)));
        counts
    }

    /// Resolve a raw question to a category.
    ///
    /// An exact match on the normalized text always wins. Otherwise the
    /// indexed key with the highest similarity is accepted if its ratio is at
    /// least [`FUZZY_THRESHOLD`].
    #[must_use]
    pub fn resolve(&self, question: &str) -> CategoryMatch {
        let normalized = normalize_question(question);

        if let Some(&slot) = self.by_key.get(&normalized) {
            return CategoryMatch::Exact(self.entries[slot].category.clone());
        }

        match self.best_fuzzy(&normalized) {
            Some((category, ratio)) if ratio >= FUZZY_THRESHOLD => CategoryMatch::Fuzzy {
                category: category.clone(),
                ratio,
            },
            _ => CategoryMatch::Unmatched,
        }
    }

    /// Highest-ratio entry for an already-normalized query.
    ///
    /// Ties keep the earliest inserted key.
    #[must_use]
    pub fn best_fuzzy(&self, normalized: &str) -> Option<(&Category, f32)> {
        let query = normalized.to_lowercase();
        let mut best: Option<(&Category, f32)> = None;

        for entry in &self.entries {
            let ratio = similarity(&query, &entry.lower);
            if best.is_none_or(|(_, top)| ratio > top) {
                best = Some((&entry.category, ratio));
            }
        }

        best
    }
}

/// Symmetric character-level similarity in `[0, 1]`; `1.0` for identical input.
///
/// Computed as `2 * matched / (len(a) + len(b))` over a character diff.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f32 {
    if a == b {
        return 1.0;
    }
    TextDiff::from_chars(a, b).ratio()
}

#[cfg(test)]
#[path = "category_test.rs"]
mod tests;
