//! Source and citation extraction from free-form answers.
//!
//! Chat answers cite sources in a handful of recurring layouts: a source name
//! on its own line followed by a `+N` counter, a bare domain on its own line,
//! a capitalized name on its own line, or an inline URL. Each layout has its
//! own pattern; every candidate then goes through one validity filter.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Social platforms and aggregators that are never reported as sources.
pub const DEFAULT_NON_SOURCE_DOMAINS: &[&str] = &[
    "facebook.com",
    "youtube.com",
    "twitter.com",
    "x.com",
    "instagram.com",
    "tiktok.com",
    "reddit.com",
    "linkedin.com",
    "pinterest.com",
    "whatsapp.com",
    "telegram.org",
];

const SECTION_HEADERS: &[&str] = &[
    "pros",
    "cons",
    "ventajas",
    "desventajas",
    "nota",
    "note",
    "notes",
    "tips",
    "tip",
    "warning",
    "conclusion",
    "conclusión",
    "resumen",
    "summary",
    "example",
    "ejemplo",
    "important",
    "importante",
    "alternativas",
    "alternatives",
    "opciones",
    "options",
];

/// Words that open sentences rather than names.
const SENTENCE_STARTERS: &[&str] = &[
    "you", "i", "we", "they", "he", "she", "it", "this", "that", "a", "an", "is", "are", "was",
    "were", "have", "has", "had", "do", "does", "did", "will", "would", "could", "should", "may",
    "might", "must", "can", "if", "when", "where", "what", "why", "how", "which", "there", "here",
    "some", "any", "all", "most", "many", "few", "no", "not", "only", "also", "just", "even",
    "still", "already", "always", "never", "often", "sometimes", "usually", "generally",
    "typically",
];

const BULLET_SYMBOLS: &[char] = &[
    '•', '✔', '❌', '⚖', '📈', '🚗', '💡', '⚠', '🔁', '🏦', '🧠', '🔌', '🔋', '🚙', '🚘', '🏎', '⚡',
    '🤔', '👉', '💶', '👍', '📊', '📌', '🧾', '🎯', '🧩', '🥇', '🤝',
];

const MAX_SOURCE_WORDS: usize = 5;

/// Name on its own line, followed by a `+N` counter line.
static COUNTED_SOURCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[.!?)]\s*\n([A-Za-z][A-Za-z0-9.\-' ]{2,45}?)\n\+\d+").expect("valid regex")
});

/// Host-like token on its own line.
static DOMAIN_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[.!?)]\s*\n([a-zA-Z][a-zA-Z0-9\-]*\.[a-zA-Z0-9.\-]+)\n").expect("valid regex")
});

/// Capitalized name on its own line. The next line must not start with a
/// letter or `+`; that check is done by hand in [`bare_source_lines`].
static BARE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[.!?)]\s*\n([A-Z][A-Za-z0-9.\-' ]{2,40})\n").expect("valid regex")
});

static URL_HOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://([^\s/)]+)").expect("valid regex"));

static KNOWN_TLD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.(com|org|net|uk|es|co|io|info|gov|edu)").expect("valid regex")
});

/// Pattern-and-filter citation extractor.
#[derive(Debug, Clone)]
pub struct CitationExtractor {
    /// Lowercase domains plus their bare names (`facebook.com` and `facebook`).
    non_sources: BTreeSet<String>,
    /// Lowercase full domains, for subdomain checks.
    non_source_domains: BTreeSet<String>,
}

impl Default for CitationExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_NON_SOURCE_DOMAINS.iter().copied())
    }
}

impl CitationExtractor {
    /// Build an extractor that rejects the given domains and their bare
    /// names (`.com`/`.org` removed).
    pub fn new<I, S>(non_source_domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut non_sources = BTreeSet::new();
        let mut domains = BTreeSet::new();
        for domain in non_source_domains {
            let domain = domain.as_ref().trim().to_lowercase();
            if domain.is_empty() {
                continue;
            }
            non_sources.insert(domain.replace(".com", "").replace(".org", ""));
            non_sources.insert(domain.clone());
            domains.insert(domain);
        }
        Self {
            non_sources,
            non_source_domains: domains,
        }
    }

    /// All valid citations in `text`, deduplicated and sorted.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut found = BTreeSet::new();

        for caps in COUNTED_SOURCE.captures_iter(text) {
            let source = caps[1].trim();
            if source.chars().count() >= 3 && self.is_valid_source(source) {
                found.insert(source.to_string());
            }
        }

        for caps in DOMAIN_LINE.captures_iter(text) {
            let domain = caps[1].trim();
            if domain.len() >= 5 && domain.contains('.') && self.is_valid_source(domain) {
                found.insert(domain.to_string());
            }
        }

        for source in bare_source_lines(text) {
            let source = source.trim();
            if source.chars().count() >= 3 && self.is_valid_source(source) {
                found.insert(source.to_string());
            }
        }

        for caps in URL_HOST.captures_iter(text) {
            let host = caps[1].trim_end_matches(['.', ',', ';', ':', '!', '?', '"', '\'', ']', '>']);
            if !host.is_empty() && self.is_valid_source(host) {
                found.insert(host.to_string());
            }
        }

        found.into_iter().collect()
    }

    fn is_valid_source(&self, source: &str) -> bool {
        let lower = source.to_lowercase();

        if SECTION_HEADERS.contains(&lower.as_str()) || self.non_sources.contains(&lower) {
            return false;
        }
        if self
            .non_source_domains
            .iter()
            .any(|d| lower.strip_suffix(d.as_str()).is_some_and(|p| p.ends_with('.')))
        {
            return false;
        }

        let mut words = source.split_whitespace();
        let Some(first_word) = words.next() else {
            return false;
        };
        if SENTENCE_STARTERS.contains(&first_word.to_lowercase().as_str()) {
            return false;
        }
        if words.count() + 1 > MAX_SOURCE_WORDS {
            return false;
        }

        // A period before the last character is prose unless a known TLD follows it.
        let mut chars = source.chars();
        chars.next_back();
        if chars.as_str().contains('.') && !KNOWN_TLD.is_match(&lower) {
            return false;
        }

        match source.chars().next() {
            Some(c) if c.is_numeric() || BULLET_SYMBOLS.contains(&c) => false,
            Some(_) => true,
            None => false,
        }
    }
}

/// Captures of [`BARE_LINE`] whose following character is not a letter or `+`.
///
/// A rejected match restarts the scan one character after its start, the
/// same way a failed lookahead would.
fn bare_source_lines(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let Some(caps) = BARE_LINE.captures_at(text, start) else {
            break;
        };
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            break;
        };

        let next = text[whole.end()..].chars().next();
        if next.is_some_and(|c| c.is_ascii_alphabetic() || c == '+') {
            let step = text[whole.start()..].chars().next().map_or(1, char::len_utf8);
            start = whole.start() + step;
            continue;
        }

        out.push(name.as_str());
        start = whole.end();
    }

    out
}
