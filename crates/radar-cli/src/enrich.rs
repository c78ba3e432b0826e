//! `enrich` command: category, mention, ranking and citation fields.

use std::path::Path;

use anyhow::Context;
use radar_core::{brand_from_title, AppConfig, BrandRegistry, CategorySource, Record};
use radar_enrich::{BrandWhitelist, CategoryIndex, CitationExtractor, Enricher, EnrichmentStats};
use radar_sentiment::{
    infer_country, ChatClient, CompetitorCache, CompetitorSuggester, SentimentConfig,
};

pub(crate) struct EnrichOptions<'a> {
    pub input: &'a Path,
    pub categories: &'a Path,
    pub brand: Option<&'a str>,
    pub lang: Option<&'a str>,
}

/// Load, enrich and return the records together with the main brand used.
///
/// # Errors
///
/// Returns an error if the record store or category source cannot be read.
pub(crate) async fn run_enrich(
    config: &AppConfig,
    registry: &BrandRegistry,
    options: &EnrichOptions<'_>,
) -> anyhow::Result<(Vec<Record>, String)> {
    let source = radar_core::load_category_source(options.categories)?;
    let brand = options.brand.map_or_else(
        || brand_from_title(source.title.as_deref().unwrap_or_default()),
        str::to_string,
    );

    let index = CategoryIndex::from_source(&source);
    tracing::info!(
        brand = %brand,
        questions = index.len(),
        categories = source.category_sheets().len(),
        "category index built"
    );
    for (category, count) in index.distribution() {
        tracing::debug!(id = category.id.get(), name = %category.name, count, "category");
    }

    let whitelist = build_whitelist(config, registry, &source, options, &brand).await;
    tracing::info!(
        brand = %brand,
        competitors = whitelist.competitors().len(),
        "brand whitelist ready"
    );

    let mut records = radar_core::load_records(options.input)?;
    let mut enricher = Enricher::new(index, whitelist, citation_extractor(registry));
    enricher.enrich_all(&mut records);
    let stats = enricher.into_stats();
    log_stats(&stats);

    Ok((records, brand))
}

/// Write records, logging the destination.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub(crate) fn write_output(path: &Path, records: &[Record]) -> anyhow::Result<()> {
    radar_core::write_records(path, records)
        .with_context(|| format!("writing {} records", records.len()))?;
    tracing::info!(path = %path.display(), records = records.len(), "records written");
    Ok(())
}

/// Competitors from the category source, plus the registry entry for a
/// configured brand or LLM suggestions for an unconfigured one, minus
/// ignore terms.
async fn build_whitelist(
    config: &AppConfig,
    registry: &BrandRegistry,
    source: &CategorySource,
    options: &EnrichOptions<'_>,
    brand: &str,
) -> BrandWhitelist {
    let mut competitors = source.competitor_names();
    let mut industry = registry.industry(brand).map(str::to_string);

    if registry.is_configured(brand) {
        let configured = registry.competitors(brand);
        tracing::info!(brand, merged = configured.len(), "using registry competitors");
        competitors.extend(configured);
    } else {
        let source_name = options.categories.display().to_string();
        let text = format!("{source_name} {}", source.descriptive_text());
        if let Some(detected) = registry.detect_industry(&text) {
            let lang = options.lang.unwrap_or_else(|| source.guess_language());
            let country = infer_country(&source_name, lang);
            tracing::info!(
                brand,
                industry = detected,
                country,
                "brand not configured, detected industry"
            );

            let client = match ChatClient::new(&SentimentConfig::from_app_config(config)) {
                Ok(client) => Some(client),
                Err(e) => {
                    tracing::warn!(error = %e, "competitor suggestions unavailable");
                    None
                }
            };
            let mut suggester = CompetitorSuggester::new(client, CompetitorCache::new());
            competitors.extend(suggester.suggest(brand, detected, country).await);
            industry = Some(detected.to_string());
        } else {
            tracing::warn!(brand, "brand not configured and no industry detected");
        }
    }

    let ignore = registry.ignore_terms(brand, industry.as_deref());
    BrandWhitelist::new(brand, competitors).without_terms(&ignore)
}

fn citation_extractor(registry: &BrandRegistry) -> CitationExtractor {
    let domains = registry.non_source_domains();
    if domains.is_empty() {
        CitationExtractor::default()
    } else {
        CitationExtractor::new(domains)
    }
}

fn log_stats(stats: &EnrichmentStats) {
    if stats.unmatched > 0 {
        tracing::warn!(
            unmatched = stats.unmatched,
            total = stats.total,
            "questions without a category"
        );
    }
    stats.log_summary();
}
