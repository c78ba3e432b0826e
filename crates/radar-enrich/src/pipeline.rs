//! Per-record enrichment orchestration.

use radar_core::Record;

use crate::category::{CategoryIndex, CategoryMatch};
use crate::citations::CitationExtractor;
use crate::mentions::{mentions_brand, BrandDetector, BrandWhitelist};
use crate::ranking::{build_ranking, Ranking};
use crate::stats::EnrichmentStats;

/// Signals extracted from one question/answer pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    pub category: CategoryMatch,
    pub mention: bool,
    /// Competitors found in the answer, whitelist order.
    pub detected: Vec<String>,
    pub ranking: Ranking,
    pub citations: Vec<String>,
}

impl Enrichment {
    /// Write the enrichment fields onto `record`. Classification fields are
    /// left as they are.
    pub fn apply_to(self, record: &mut Record) {
        record.category_id = Some(self.category.id());
        record.category_name = Some(self.category.name().to_string());
        record.mention = Some(self.mention);
        record.ranking_list = Some(self.ranking.brands);
        record.position = self.ranking.position;
        record.citations = Some(self.citations);
    }
}

/// Runs every extraction step over records, one at a time, and keeps the
/// batch totals.
#[derive(Debug)]
pub struct Enricher {
    index: CategoryIndex,
    detector: BrandDetector,
    citations: CitationExtractor,
    stats: EnrichmentStats,
}

impl Enricher {
    #[must_use]
    pub fn new(index: CategoryIndex, whitelist: BrandWhitelist, citations: CitationExtractor) -> Self {
        Self {
            index,
            detector: BrandDetector::new(whitelist),
            citations,
            stats: EnrichmentStats::new(),
        }
    }

    #[must_use]
    pub fn main_brand(&self) -> &str {
        self.detector.whitelist().main_brand()
    }

    /// Extract all signals for one question/answer pair and count them.
    pub fn analyze(&mut self, question: &str, answer: &str) -> Enrichment {
        let question = question.trim();
        let answer = answer.trim();

        let category = self.index.resolve(question);
        match &category {
            CategoryMatch::Fuzzy { category: c, ratio } => {
                tracing::debug!(question, category = %c.name, ratio, "fuzzy category match");
            }
            CategoryMatch::Unmatched => {
                tracing::debug!(question, "no category match");
            }
            CategoryMatch::Exact(_) => {}
        }

        let main_brand = self.detector.whitelist().main_brand().to_string();
        let mention = mentions_brand(answer, &main_brand);
        let detected = self.detector.detect(answer);
        let ranking = build_ranking(answer, &main_brand, &detected);
        let citations = self.citations.extract(answer);

        let enrichment = Enrichment {
            category,
            mention,
            detected,
            ranking,
            citations,
        };
        self.stats.record(&enrichment);
        enrichment
    }

    /// Enrich one record in place.
    pub fn enrich(&mut self, record: &mut Record) {
        let enrichment = self.analyze(&record.question_text, &record.answer);
        enrichment.apply_to(record);
    }

    /// Enrich every record in order.
    pub fn enrich_all(&mut self, records: &mut [Record]) {
        for record in records.iter_mut() {
            self.enrich(record);
        }
        tracing::info!(
            records = records.len(),
            unmatched = self.stats.unmatched,
            "enriched records"
        );
    }

    #[must_use]
    pub fn stats(&self) -> &EnrichmentStats {
        &self.stats
    }

    #[must_use]
    pub fn into_stats(self) -> EnrichmentStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;

    fn enricher() -> Enricher {
        let mut index = CategoryIndex::new();
        index.insert(
            "Cuál es la mejor casa de apuestas",
            NonZeroU32::new(3).unwrap(),
            "Comparativas",
        );
        let whitelist = BrandWhitelist::new("Betfair", ["Bet365", "William Hill"]);
        Enricher::new(index, whitelist, CitationExtractor::default())
    }

    #[test]
    fn enriches_a_record_end_to_end() {
        let mut e = enricher();
        let mut record = Record::new(
            "¿Cuál es la mejor casa de apuestas?",
            "Betfair and Bet365 are both solid, but William Hill has better odds.\nOddschecker\n+4",
        );
        e.enrich(&mut record);

        assert_eq!(record.category_id, Some(3));
        assert_eq!(record.category_name.as_deref(), Some("Comparativas"));
        assert_eq!(record.mention, Some(true));
        assert_eq!(
            record.ranking_list,
            Some(vec![
                "Betfair".to_string(),
                "Bet365".to_string(),
                "William Hill".to_string()
            ])
        );
        assert_eq!(record.position, Some(1));
        assert_eq!(record.citations, Some(vec!["Oddschecker".to_string()]));
        assert!(record.classification.is_none());
    }

    #[test]
    fn competitor_first_ranks_main_brand_second() {
        let mut e = enricher();
        let out = e.analyze("Which bookmaker?", "I recommend Bet365 over Betfair any day.");
        assert_eq!(out.ranking.brands, vec!["Bet365", "Betfair"]);
        assert_eq!(out.ranking.position, Some(2));
        assert_eq!(out.detected, vec!["Bet365"]);
    }

    #[test]
    fn empty_answer_yields_empty_signals() {
        let mut e = enricher();
        let mut record = Record::new("Unrelated question about weather", "");
        e.enrich(&mut record);

        assert_eq!(record.category_id, Some(0));
        assert_eq!(record.category_name.as_deref(), Some("Unknown"));
        assert_eq!(record.mention, Some(false));
        assert_eq!(record.ranking_list, Some(vec![]));
        assert_eq!(record.position, None);
        assert_eq!(record.citations, Some(vec![]));
    }

    #[test]
    fn stats_accumulate_over_batch() {
        let mut e = enricher();
        let mut records = vec![
            Record::new("Cuál es la mejor casa de apuestas", "Bet365 wins."),
            Record::new("Something else entirely", "Betfair is fine."),
        ];
        e.enrich_all(&mut records);

        let stats = e.into_stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.unmatched, 1);
        assert_eq!(stats.mentions, 1);
        assert_eq!(stats.top_brands(3), vec![("Bet365".to_string(), 1)]);
    }
}
