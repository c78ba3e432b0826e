//! Answer enrichment: category resolution, competitor detection, mention
//! ranking and citation extraction.
//!
//! Everything here is synchronous and deterministic. The sentiment stage lives
//! in `radar-sentiment`.

pub mod category;
pub mod citations;
pub mod mentions;
pub mod normalize;
pub mod pipeline;
pub mod ranking;
pub mod stats;

pub use category::{Category, CategoryIndex, CategoryMatch, MatchKind, FUZZY_THRESHOLD};
pub use citations::{CitationExtractor, DEFAULT_NON_SOURCE_DOMAINS};
pub use mentions::{mentions_brand, BrandDetector, BrandWhitelist, MatcherCache};
pub use normalize::normalize_question;
pub use pipeline::{Enricher, Enrichment};
pub use ranking::{build_ranking, Ranking};
pub use stats::EnrichmentStats;
