//! Sequential evaluation of enriched records.

use std::time::Duration;

use radar_core::Record;

use crate::classifier::SentimentClassifier;
use crate::stats::EvaluationStats;
use crate::types::ClassificationRequest;

const PROGRESS_EVERY: usize = 10;

/// Classify every record in order, writing the verdict onto it.
///
/// Records without a `mention` field count as not mentioning the brand.
/// `delay` is slept after each call to stay under the service rate limit.
/// Service failures never stop the loop; see
/// [`SentimentClassifier::classify`].
pub async fn evaluate_records(
    classifier: &SentimentClassifier,
    brand: &str,
    records: &mut [Record],
    delay: Duration,
) -> EvaluationStats {
    let total = records.len();
    let mut stats = EvaluationStats::new();
    tracing::info!(brand, records = total, "evaluating answers");

    for (i, record) in records.iter_mut().enumerate() {
        let mentioned = record.mention.unwrap_or(false);
        let request = ClassificationRequest {
            brand,
            question: &record.question_text,
            answer: &record.answer,
            mentioned,
        };
        let result = classifier.classify(&request).await;

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        stats.record(result.classification, mentioned);
        result.apply_to(record);

        let processed = i + 1;
        if processed % PROGRESS_EVERY == 0 || processed == total {
            stats.log_progress(processed, total);
        }
    }

    stats
}
