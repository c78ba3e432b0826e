//! Classification totals for an evaluation run.

use radar_core::Classification;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationStats {
    pub total: usize,
    pub critical: usize,
    pub warning: usize,
    pub opportunity: usize,
    /// Records whose answer does not mention the brand.
    pub no_mention: usize,
    pub no_mention_critical: usize,
}

impl EvaluationStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, classification: Classification, mentioned: bool) {
        self.total += 1;
        match classification {
            Classification::Critical => self.critical += 1,
            Classification::Warning => self.warning += 1,
            Classification::Opportunity => self.opportunity += 1,
        }
        if !mentioned {
            self.no_mention += 1;
            if classification == Classification::Critical {
                self.no_mention_critical += 1;
            }
        }
    }

    #[must_use]
    pub fn count(&self, classification: Classification) -> usize {
        match classification {
            Classification::Critical => self.critical,
            Classification::Warning => self.warning,
            Classification::Opportunity => self.opportunity,
        }
    }

    /// Share of `classification` in percent; `0.0` for an empty run.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self, classification: Classification) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(classification) as f64 * 100.0 / self.total as f64
    }

    pub fn log_progress(&self, processed: usize, of: usize) {
        tracing::info!(
            processed,
            of,
            critical = self.critical,
            warning = self.warning,
            opportunity = self.opportunity,
            "evaluation progress"
        );
    }

    pub fn log_summary(&self) {
        for c in Classification::ALL {
            tracing::info!(
                classification = %c,
                count = self.count(c),
                share = %format!("{:.1}%", self.percent(c)),
                "evaluation result"
            );
        }
        tracing::info!(
            total = self.total,
            no_mention = self.no_mention,
            no_mention_critical = self.no_mention_critical,
            no_mention_other = self.no_mention - self.no_mention_critical,
            "evaluation complete"
        );
    }
}
