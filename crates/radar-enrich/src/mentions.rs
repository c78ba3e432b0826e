//! Whitelist-based brand mention detection.
//!
//! Not a named-entity recognizer: only names listed in
//! the [`BrandWhitelist`] can ever be reported, so brands missing from the
//! registry are never discovered. Generic entities that a recognizer would
//! pick up (leagues, regulators, media outlets) stay out of the results.

use std::collections::{BTreeSet, HashMap};

use regex::Regex;

/// The main brand plus the closed set of competitor names it is compared with.
///
/// Display casing is kept as given; matching is case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct BrandWhitelist {
    main_brand: String,
    competitors: Vec<String>,
}

impl BrandWhitelist {
    /// Build a whitelist, trimming names and dropping blanks, case-insensitive
    /// duplicates, and any entry equal to the main brand.
    pub fn new<I, S>(main_brand: &str, competitors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let main_brand = main_brand.trim().to_string();
        let main_lower = main_brand.to_lowercase();
        let mut seen = BTreeSet::new();
        let mut kept = Vec::new();

        for name in competitors {
            let name = name.as_ref().trim();
            let lower = name.to_lowercase();
            if name.is_empty() || lower == main_lower || !seen.insert(lower) {
                continue;
            }
            kept.push(name.to_string());
        }

        Self {
            main_brand,
            competitors: kept,
        }
    }

    /// Drop competitors whose lowercase name is in `ignore` (own products,
    /// generic terms, media outlets).
    #[must_use]
    pub fn without_terms(mut self, ignore: &BTreeSet<String>) -> Self {
        self.competitors
            .retain(|c| !ignore.contains(&c.to_lowercase()));
        self
    }

    /// Append more competitors, keeping existing order and casing.
    #[must_use]
    pub fn extended<I, S>(self, more: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let main = self.main_brand.clone();
        let combined: Vec<String> = self
            .competitors
            .into_iter()
            .chain(more.into_iter().map(|s| s.as_ref().to_string()))
            .collect();
        Self::new(&main, combined)
    }

    #[must_use]
    pub fn main_brand(&self) -> &str {
        &self.main_brand
    }

    #[must_use]
    pub fn competitors(&self) -> &[String] {
        &self.competitors
    }
}

/// Compiled word-boundary matchers keyed by lowercase brand name.
///
/// Populated lazily on first use and never evicted; one cache lives for one
/// batch run.
#[derive(Debug, Default)]
pub struct MatcherCache {
    matchers: HashMap<String, Option<Regex>>,
}

impl MatcherCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Whether `name` occurs in `text` as a whole word, ignoring case.
    pub fn is_present(&mut self, text: &str, name: &str) -> bool {
        let key = name.to_lowercase();
        let matcher = self.matchers.entry(key).or_insert_with_key(|key| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(key));
            match Regex::new(&pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!(brand = %name, error = %e, "could not compile brand matcher");
                    None
                }
            }
        });
        matcher.as_ref().is_some_and(|re| re.is_match(text))
    }
}

/// Detects which whitelisted competitors an answer mentions.
#[derive(Debug)]
pub struct BrandDetector {
    whitelist: BrandWhitelist,
    cache: MatcherCache,
}

impl BrandDetector {
    #[must_use]
    pub fn new(whitelist: BrandWhitelist) -> Self {
        Self::with_cache(whitelist, MatcherCache::new())
    }

    #[must_use]
    pub fn with_cache(whitelist: BrandWhitelist, cache: MatcherCache) -> Self {
        Self { whitelist, cache }
    }

    #[must_use]
    pub fn whitelist(&self) -> &BrandWhitelist {
        &self.whitelist
    }

    /// Competitors present in `text`, in whitelist order and casing.
    ///
    /// Matches are whole-word and case-insensitive, so "Ford" is not found in
    /// "affordable". The main brand is never returned.
    pub fn detect(&mut self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        let main_lower = self.whitelist.main_brand.to_lowercase();
        let mut found = Vec::new();
        for name in &self.whitelist.competitors {
            if name.to_lowercase() == main_lower {
                continue;
            }
            if self.cache.is_present(text, name) {
                found.push(name.clone());
            }
        }
        found
    }
}

/// Whether the main brand appears anywhere in `text`, ignoring case.
///
/// Plain substring containment; empty inputs never match.
#[must_use]
pub fn mentions_brand(text: &str, brand: &str) -> bool {
    if text.is_empty() || brand.is_empty() {
        return false;
    }
    text.to_lowercase().contains(&brand.to_lowercase())
}
