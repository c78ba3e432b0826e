//! Aggregate statistics for an enrichment run.

use std::collections::{BTreeMap, HashMap};

use crate::category::MatchKind;
use crate::pipeline::Enrichment;

/// Counters accumulated over one batch. The main brand is never counted as a
/// detected competitor.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentStats {
    pub total: usize,
    pub unmatched: usize,
    pub fuzzy_matched: usize,
    pub mentions: usize,
    pub with_ranking: usize,
    pub with_citations: usize,
    brand_counts: HashMap<String, usize>,
    citation_counts: HashMap<String, usize>,
    positions: BTreeMap<usize, usize>,
}

impl EnrichmentStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one enriched record into the totals.
    pub fn record(&mut self, enrichment: &Enrichment) {
        self.total += 1;
        match enrichment.category.matched_by() {
            MatchKind::Exact => {}
            MatchKind::Fuzzy => self.fuzzy_matched += 1,
            MatchKind::None => self.unmatched += 1,
        }
        if enrichment.mention {
            self.mentions += 1;
        }
        if !enrichment.ranking.brands.is_empty() {
            self.with_ranking += 1;
        }
        if !enrichment.citations.is_empty() {
            self.with_citations += 1;
        }
        for brand in &enrichment.detected {
            *self.brand_counts.entry(brand.clone()).or_default() += 1;
        }
        for citation in &enrichment.citations {
            *self.citation_counts.entry(citation.clone()).or_default() += 1;
        }
        if let Some(p) = enrichment.ranking.position {
            *self.positions.entry(p).or_default() += 1;
        }
    }

    /// Most frequently detected competitors, count descending then name.
    #[must_use]
    pub fn top_brands(&self, n: usize) -> Vec<(String, usize)> {
        top_n(&self.brand_counts, n)
    }

    #[must_use]
    pub fn top_citations(&self, n: usize) -> Vec<(String, usize)> {
        top_n(&self.citation_counts, n)
    }

    /// Records per main-brand position, ascending.
    #[must_use]
    pub fn position_distribution(&self) -> &BTreeMap<usize, usize> {
        &self.positions
    }

    /// `count` as a percentage of all records; `0.0` for an empty run.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        count as f64 * 100.0 / self.total as f64
    }

    /// Emit the run summary at `info`.
    pub fn log_summary(&self) {
        tracing::info!(
            total = self.total,
            unmatched = self.unmatched,
            fuzzy_matched = self.fuzzy_matched,
            "category resolution finished"
        );
        tracing::info!(
            mentions = self.mentions,
            mention_rate = %format!("{:.1}%", self.percent(self.mentions)),
            with_ranking = self.with_ranking,
            ranking_rate = %format!("{:.1}%", self.percent(self.with_ranking)),
            with_citations = self.with_citations,
            citation_rate = %format!("{:.1}%", self.percent(self.with_citations)),
            "enrichment summary"
        );
        for (brand, count) in self.top_brands(10) {
            tracing::info!(brand = %brand, count, "top detected brand");
        }
        for (position, count) in &self.positions {
            tracing::info!(position, count, "main brand position");
        }
        for (citation, count) in self.top_citations(10) {
            tracing::info!(citation = %citation, count, "top citation");
        }
    }
}

fn top_n(counts: &HashMap<String, usize>, n: usize) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> =
        counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
    entries.sort_by(|(a_name, a), (b_name, b)| b.cmp(a).then_with(|| a_name.cmp(b_name)));
    entries.truncate(n);
    entries
}
