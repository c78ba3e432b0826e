//! Competitor suggestions for brands missing from the registry.

use std::collections::{BTreeSet, HashMap};

use crate::client::ChatClient;
use crate::prompt::build_competitor_prompt;

const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.3;
const MAX_NAME_CHARS: usize = 50;

/// Suggested competitors keyed by lowercase `brand|industry|country`.
///
/// Lives for one batch run and is never evicted. Failed lookups are not
/// stored, so a later call retries them.
#[derive(Debug, Default)]
pub struct CompetitorCache {
    entries: HashMap<String, Vec<String>>,
}

impl CompetitorCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn key(brand: &str, industry: &str, country: &str) -> String {
        format!("{brand}|{industry}|{country}").to_lowercase()
    }

    #[must_use]
    pub fn get(&self, brand: &str, industry: &str, country: &str) -> Option<&[String]> {
        self.entries
            .get(&Self::key(brand, industry, country))
            .map(Vec::as_slice)
    }

    pub fn insert(&mut self, brand: &str, industry: &str, country: &str, names: Vec<String>) {
        self.entries.insert(Self::key(brand, industry, country), names);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Asks the chat-completion service for a brand's competitors.
pub struct CompetitorSuggester {
    client: Option<ChatClient>,
    cache: CompetitorCache,
}

impl CompetitorSuggester {
    /// `client` is `None` when no API key is configured; every lookup then
    /// returns an empty list.
    #[must_use]
    pub fn new(client: Option<ChatClient>, cache: CompetitorCache) -> Self {
        Self { client, cache }
    }

    #[must_use]
    pub fn cache(&self) -> &CompetitorCache {
        &self.cache
    }

    /// Competitors of `brand` in `industry` and `country`, cached per run.
    pub async fn suggest(&mut self, brand: &str, industry: &str, country: &str) -> Vec<String> {
        if let Some(cached) = self.cache.get(brand, industry, country) {
            return cached.to_vec();
        }

        let Some(client) = &self.client else {
            tracing::warn!(brand, "no API key configured, cannot suggest competitors");
            return Vec::new();
        };

        let prompt = build_competitor_prompt(brand, industry, country);
        match client.complete(&prompt, TEMPERATURE, MAX_TOKENS).await {
            Ok(content) => {
                let names = parse_competitor_lines(&content, brand);
                tracing::info!(
                    brand,
                    industry,
                    country,
                    count = names.len(),
                    "received competitor suggestions"
                );
                self.cache.insert(brand, industry, country, names.clone());
                names
            }
            Err(e) => {
                tracing::warn!(brand, industry, error = %e, "competitor suggestion failed");
                Vec::new()
            }
        }
    }
}

/// Parse a one-name-per-line reply.
///
/// Blank lines, numbered lines, lines of 50+ characters and lines with a `:`
/// are dropped; leading bullets are stripped; the brand itself and duplicates
/// are removed. First-seen order is kept.
#[must_use]
pub fn parse_competitor_lines(content: &str, brand: &str) -> Vec<String> {
    let brand_lower = brand.to_lowercase();
    let mut seen = BTreeSet::new();
    let mut names = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        let Some(first) = line.chars().next() else {
            continue;
        };
        if first.is_numeric() || line.chars().count() >= MAX_NAME_CHARS || line.contains(':') {
            continue;
        }
        let name = line.trim_start_matches(['-', '•', '*']).trim_start();
        if name.is_empty() || name.to_lowercase() == brand_lower {
            continue;
        }
        if seen.insert(name.to_string()) {
            names.push(name.to_string());
        }
    }

    names
}

/// Guess the market from a source file name, falling back to the answer
/// language.
#[must_use]
pub fn infer_country(source_name: &str, language: &str) -> &'static str {
    let name = source_name.to_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|n| name.contains(n));

    if has(&["_es", "españa", "spain"]) {
        "Spain"
    } else if has(&["_uk", "uk"]) {
        "UK"
    } else if has(&["_us", "usa"]) {
        "USA"
    } else if has(&["_de", "germany"]) {
        "Germany"
    } else if has(&["_fr", "france"]) {
        "France"
    } else {
        match language {
            "es" => "Spain",
            "en" => "UK",
            _ => "global",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_bulleted_lines() {
        let reply = "Bet365\n- William Hill\n• Codere\n* Bwin\n\n1. Sportium\nHere are the main competitors:\nBetfair\nbet365";
        assert_eq!(
            parse_competitor_lines(reply, "Betfair"),
            vec!["Bet365", "William Hill", "Codere", "Bwin", "bet365"]
        );
    }

    #[test]
    fn long_lines_are_dropped() {
        let long = "A".repeat(50);
        assert!(parse_competitor_lines(&long, "X").is_empty());
        assert_eq!(parse_competitor_lines(&"B".repeat(49), "X").len(), 1);
    }

    #[test]
    fn exact_duplicates_collapse() {
        assert_eq!(parse_competitor_lines("Tesla\n- Tesla\nKia", "BYD"), vec!["Tesla", "Kia"]);
    }

    #[test]
    fn country_from_file_name() {
        assert_eq!(infer_country("categorias_es.yaml", "en"), "Spain");
        assert_eq!(infer_country("BYD_UK_questions.yaml", "es"), "UK");
        assert_eq!(infer_country("market_usa.yaml", "es"), "USA");
        assert_eq!(infer_country("preguntas_de.yaml", "es"), "Germany");
        assert_eq!(infer_country("France-2025.yaml", "en"), "France");
    }

    #[test]
    fn country_from_language_fallback() {
        assert_eq!(infer_country("questions.yaml", "es"), "Spain");
        assert_eq!(infer_country("questions.yaml", "en"), "UK");
        assert_eq!(infer_country("questions.yaml", "it"), "global");
    }

    #[test]
    fn cache_keys_ignore_case() {
        let mut cache = CompetitorCache::new();
        cache.insert("Betfair", "Betting", "Spain", vec!["Bet365".into()]);
        assert_eq!(
            cache.get("betfair", "betting", "SPAIN"),
            Some(["Bet365".to_string()].as_slice())
        );
        assert!(cache.get("betfair", "betting", "UK").is_none());
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn missing_client_yields_empty_and_caches_nothing() {
        let mut suggester = CompetitorSuggester::new(None, CompetitorCache::new());
        assert!(suggester.suggest("Acme", "betting", "Spain").await.is_empty());
        assert!(suggester.cache().is_empty());
    }
}
