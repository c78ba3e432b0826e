//! Category source: the question battery grouped into category sheets.
//!
//! The battery is authored as a spreadsheet upstream; it reaches this crate
//! exported to YAML with one entry per sheet. Turning it into a lookup index
//! happens in `radar-enrich`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Sheet names containing any of these are bookkeeping, not categories.
const NON_CATEGORY_SHEETS: &[&str] = &[
    "resumen",
    "summary",
    "plantilla",
    "template",
    "instructions",
    "compet",
];

/// Cell values that are column headers rather than questions.
const HEADER_CELLS: &[&str] = &["nº", "no", "num", "pregunta", "question"];

/// Words in a battery title that are never the brand.
const TITLE_STOP_WORDS: &[&str] = &[
    "BATERIA", "EVALUACION", "EVALUATION", "LLM", "LLMS", "QUESTION", "QUESTIONS", "BATTERY",
    "PREGUNTAS", "ESPANA", "SPAIN", "UK", "MARKET", "MERCADO", "DE", "THE", "FOR", "IN", "EN",
    "AND", "Y", "OR", "O", "A", "AN", "EL", "LA", "LOS", "LAS",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategorySheet {
    pub name: String,
    #[serde(default)]
    pub questions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategorySource {
    /// Battery title, e.g. `"BATERÍA DE EVALUACIÓN LLM - BETFAIR ESPAÑA"`.
    pub title: Option<String>,
    #[serde(default)]
    pub sheets: Vec<CategorySheet>,
    /// Competitor names listed alongside the battery.
    #[serde(default)]
    pub competitors: Vec<String>,
}

/// Load a category source from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed.
pub fn load_category_source(path: &Path) -> Result<CategorySource, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CategoriesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_yaml::from_str(&content).map_err(ConfigError::CategoriesFileParse)
}

impl CategorySource {
    /// Category sheets in order, paired with their 1-based category id.
    ///
    /// Ids follow position among the category sheets only, so skipped
    /// bookkeeping sheets do not leave gaps.
    #[must_use]
    pub fn category_sheets(&self) -> Vec<(u32, &CategorySheet)> {
        self.sheets
            .iter()
            .filter(|s| {
                let lower = s.name.to_lowercase();
                !NON_CATEGORY_SHEETS.iter().any(|x| lower.contains(x))
            })
            .zip(1u32..)
            .map(|(sheet, id)| (id, sheet))
            .collect()
    }

    /// Language code guessed from sheet names: `"es"` if any sheet name
    /// contains "español" or "resumen", otherwise `"en"`.
    #[must_use]
    pub fn guess_language(&self) -> &'static str {
        let spanish = self.sheets.iter().any(|s| {
            let lower = s.name.to_lowercase();
            lower.contains("español") || lower.contains("resumen")
        });
        if spanish {
            "es"
        } else {
            "en"
        }
    }

    /// Title and sheet names joined, for keyword-based industry detection.
    #[must_use]
    pub fn descriptive_text(&self) -> String {
        self.title
            .iter()
            .chain(self.sheets.iter().map(|s| &s.name))
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Trimmed, non-blank, non-duplicate competitor names in file order.
    #[must_use]
    pub fn competitor_names(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for name in &self.competitors {
            let name = name.trim();
            if !name.is_empty() && !out.iter().any(|n| n == name) {
                out.push(name.to_string());
            }
        }
        out
    }
}

impl CategorySheet {
    /// Display name with any leading `"N. "` numbering removed.
    #[must_use]
    pub fn category_name(&self) -> &str {
        match self.name.split_once(". ") {
            Some((_, rest)) => rest,
            None => &self.name,
        }
    }

    /// Question cells with blanks and header-like values removed.
    pub fn question_cells(&self) -> impl Iterator<Item = &str> {
        self.questions
            .iter()
            .map(|q| q.trim())
            .filter(|q| !q.is_empty() && !HEADER_CELLS.contains(&q.to_lowercase().as_str()))
    }
}

/// Extract the brand name from a battery title.
///
/// Returns the first word (split on whitespace and dashes) that is longer
/// than one character and not a stop word once accents are folded,
/// capitalized. Falls back to the first word, then to `"Unknown"`.
#[must_use]
pub fn brand_from_title(title: &str) -> String {
    let upper = title.to_uppercase();
    let words: Vec<&str> = upper
        .split(|c: char| c.is_whitespace() || matches!(c, '-' | '–' | '—'))
        .filter(|w| !w.is_empty())
        .collect();

    for word in &words {
        let folded = fold_accents(word);
        if !TITLE_STOP_WORDS.contains(&folded.as_str()) && word.chars().count() > 1 {
            return capitalize(word);
        }
    }

    words
        .first()
        .map_or_else(|| "Unknown".to_string(), |w| capitalize(w))
}

fn fold_accents(word: &str) -> String {
    word.chars()
        .map(|c| match c {
            'Á' => 'A',
            'É' => 'E',
            'Í' => 'I',
            'Ó' => 'O',
            'Ú' | 'Ü' => 'U',
            'Ñ' => 'N',
            other => other,
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(name: &str, questions: &[&str]) -> CategorySheet {
        CategorySheet {
            name: name.to_string(),
            questions: questions.iter().map(|q| (*q).to_string()).collect(),
        }
    }

    #[test]
    fn category_sheets_skip_bookkeeping_and_number_from_one() {
        let source = CategorySource {
            title: None,
            sheets: vec![
                sheet("Resumen", &[]),
                sheet("1. Comparativas", &[]),
                sheet("2. Reputación", &[]),
                sheet("Competidores", &[]),
                sheet("3. Producto", &[]),
            ],
            competitors: vec![],
        };
        let ids: Vec<(u32, &str)> = source
            .category_sheets()
            .into_iter()
            .map(|(id, s)| (id, s.category_name()))
            .collect();
        assert_eq!(
            ids,
            vec![(1, "Comparativas"), (2, "Reputación"), (3, "Producto")]
        );
    }

    #[test]
    fn category_name_without_prefix_is_unchanged() {
        assert_eq!(sheet("Pricing", &[]).category_name(), "Pricing");
    }

    #[test]
    fn question_cells_drop_headers_and_blanks() {
        let s = sheet(
            "1. Comparativas",
            &["Pregunta", "  ", "Nº", "¿Cuál es la mejor casa de apuestas? "],
        );
        let cells: Vec<&str> = s.question_cells().collect();
        assert_eq!(cells, vec!["¿Cuál es la mejor casa de apuestas?"]);
    }

    #[test]
    fn competitor_names_trim_and_dedupe() {
        let source = CategorySource {
            title: None,
            sheets: vec![],
            competitors: vec![
                " Bet365 ".to_string(),
                String::new(),
                "Bet365".to_string(),
                "Codere".to_string(),
            ],
        };
        assert_eq!(source.competitor_names(), vec!["Bet365", "Codere"]);
    }

    #[test]
    fn language_guessed_from_sheet_names() {
        let spanish = CategorySource {
            sheets: vec![sheet("Resumen", &[]), sheet("1. Pagos", &[])],
            ..CategorySource::default()
        };
        let english = CategorySource {
            sheets: vec![sheet("1. Pricing", &[])],
            ..CategorySource::default()
        };
        assert_eq!(spanish.guess_language(), "es");
        assert_eq!(english.guess_language(), "en");
    }

    #[test]
    fn descriptive_text_joins_title_and_sheets() {
        let source = CategorySource {
            title: Some("Betting battery".to_string()),
            sheets: vec![sheet("1. Odds", &[]), sheet("2. Casino", &[])],
            competitors: vec![],
        };
        assert_eq!(source.descriptive_text(), "Betting battery 1. Odds 2. Casino");
    }

    #[test]
    fn brand_from_spanish_title() {
        assert_eq!(
            brand_from_title("BATERÍA DE EVALUACIÓN LLM - BETFAIR ESPAÑA"),
            "Betfair"
        );
    }

    #[test]
    fn brand_from_english_title() {
        assert_eq!(brand_from_title("BYD LLM EVALUATION - QUESTION BATTERY"), "Byd");
    }

    #[test]
    fn brand_from_empty_title_is_unknown() {
        assert_eq!(brand_from_title("   "), "Unknown");
    }

    #[test]
    fn brand_from_title_falls_back_to_first_word() {
        assert_eq!(brand_from_title("LLM EVALUATION"), "Llm");
    }
}
