use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Settings shared by every brand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Generic words that must never be treated as a brand.
    #[serde(default)]
    pub generic_ignore: Vec<String>,
    /// Domains (social platforms, aggregators) that are not citation sources.
    #[serde(default)]
    pub non_source_domains: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndustryConfig {
    /// Words whose presence in a source name hints at this industry.
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub ignore_terms: Vec<String>,
    /// Media outlets that get mentioned a lot but do not compete.
    #[serde(default)]
    pub media_sources: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandProfile {
    pub industry: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub competitors: Vec<String>,
    /// The brand's own product lines; never detected as competitors.
    #[serde(default)]
    pub own_products: Vec<String>,
}

/// Brand registry loaded from `brands.yaml`.
///
/// Brand lookups are case-insensitive; the key casing in the file is the
/// display casing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandRegistry {
    #[serde(default)]
    pub global: GlobalConfig,
    #[serde(default)]
    pub industries: BTreeMap<String, IndustryConfig>,
    #[serde(default)]
    pub brands: BTreeMap<String, BrandProfile>,
}

/// Load and validate the brand registry from a YAML file.
///
/// A missing file is an error: the registry is a startup precondition.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_brand_registry(path: &Path) -> Result<BrandRegistry, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::BrandsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_brand_registry(&content)
}

/// Parse and validate a registry from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_brand_registry(content: &str) -> Result<BrandRegistry, ConfigError> {
    let registry: BrandRegistry =
        serde_yaml::from_str(content).map_err(ConfigError::BrandsFileParse)?;
    validate_registry(&registry)?;
    Ok(registry)
}

fn validate_registry(registry: &BrandRegistry) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for (name, profile) in &registry.brands {
        if name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "brand name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate brand name: '{name}'"
            )));
        }

        if let Some(industry) = &profile.industry {
            if !registry.industries.contains_key(industry) {
                return Err(ConfigError::Validation(format!(
                    "brand '{name}' references unknown industry '{industry}'"
                )));
            }
        }
    }

    Ok(())
}

impl BrandRegistry {
    /// Case-insensitive brand lookup.
    #[must_use]
    pub fn brand(&self, brand: &str) -> Option<&BrandProfile> {
        let wanted = brand.to_lowercase();
        self.brands
            .iter()
            .find(|(name, _)| name.to_lowercase() == wanted)
            .map(|(_, profile)| profile)
    }

    #[must_use]
    pub fn is_configured(&self, brand: &str) -> bool {
        self.brand(brand).is_some()
    }

    /// Known competitors for `brand`, in file order. Empty when unconfigured.
    #[must_use]
    pub fn competitors(&self, brand: &str) -> Vec<String> {
        self.brand(brand)
            .map(|p| p.competitors.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn own_products(&self, brand: &str) -> Vec<String> {
        self.brand(brand)
            .map(|p| p.own_products.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn industry(&self, brand: &str) -> Option<&str> {
        self.brand(brand).and_then(|p| p.industry.as_deref())
    }

    /// Language code for a brand, defaulting to `"en"`.
    #[must_use]
    pub fn language(&self, brand: &str) -> &str {
        self.brand(brand)
            .and_then(|p| p.language.as_deref())
            .unwrap_or("en")
    }

    #[must_use]
    pub fn brand_names(&self) -> Vec<&str> {
        self.brands.keys().map(String::as_str).collect()
    }

    /// Lowercase terms to drop from brand detection for `brand`.
    ///
    /// Union of the global generic ignores, the effective industry's ignore
    /// terms and media sources, and the brand's own products. The brand's
    /// configured industry takes precedence over `industry_override`.
    #[must_use]
    pub fn ignore_terms(&self, brand: &str, industry_override: Option<&str>) -> BTreeSet<String> {
        let mut ignore: BTreeSet<String> = self
            .global
            .generic_ignore
            .iter()
            .map(|t| t.to_lowercase())
            .collect();

        let effective = self.industry(brand).or(industry_override);
        if let Some(industry) = effective.and_then(|i| self.industries.get(i)) {
            ignore.extend(industry.ignore_terms.iter().map(|t| t.to_lowercase()));
            ignore.extend(industry.media_sources.iter().map(|t| t.to_lowercase()));
        }

        ignore.extend(self.own_products(brand).iter().map(|p| p.to_lowercase()));
        ignore
    }

    /// Lowercase domains that are never citations. Filtering, including the
    /// subdomain check, happens in `radar-enrich`'s citation extractor.
    #[must_use]
    pub fn non_source_domains(&self) -> BTreeSet<String> {
        self.global
            .non_source_domains
            .iter()
            .map(|d| d.to_lowercase())
            .collect()
    }

    /// Guess the industry from free text such as a file or sheet name.
    ///
    /// Each industry scores one point per keyword contained in the lowercased
    /// text. The single highest non-zero score wins; a tie yields `None`.
    #[must_use]
    pub fn detect_industry(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        let mut best: Option<(&str, usize)> = None;
        let mut tied = false;

        for (name, industry) in &self.industries {
            let score = industry
                .keywords
                .iter()
                .filter(|kw| lower.contains(&kw.to_lowercase()))
                .count();
            if score == 0 {
                continue;
            }
            match best {
                Some((_, top)) if score == top => tied = true,
                Some((_, top)) if score < top => {}
                _ => {
                    best = Some((name.as_str(), score));
                    tied = false;
                }
            }
        }

        if tied {
            None
        } else {
            best.map(|(name, _)| name)
        }
    }
}

#[cfg(test)]
#[path = "brands_test.rs"]
mod tests;
