//! Search policy configuration
//!
//! Stop words, venue keyword lists, city lists, similarity thresholds and
//! result caps are process-wide immutable policy: built once at startup and
//! shared, never re-declared per query. Compiled defaults cover normal
//! operation; a TOML file can override individual values. A missing or
//! unparseable file logs a warning and keeps the defaults - configuration
//! problems never prevent startup.

use std::collections::HashSet;
use std::path::Path;

use regex::RegexSet;
use serde::Deserialize;
use tracing::warn;

/// Minimum trigram-similarity scores per matching context.
///
/// These are tuned policy constants, not computed values. `venue` applies to
/// venue name/city/state/country fields, `special` to the space-normalized
/// fallback of special-character searches.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Poster title/description similarity
    pub generic: f32,
    /// Artist name similarity
    pub artist: f32,
    /// Venue name and city/state/country similarity
    pub venue: f32,
    /// Special-character fallback similarity
    pub special: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            generic: 0.4,
            artist: 0.3,
            venue: 0.2,
            special: 0.3,
        }
    }
}

/// Hard caps on result-set sizes, applied in SQL
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ResultCaps {
    /// Single-term fallback search
    pub single_term: i64,
    /// Special-character search
    pub special_character: i64,
}

impl Default for ResultCaps {
    fn default() -> Self {
        Self {
            single_term: 20,
            special_character: 50,
        }
    }
}

/// Default stop words removed from queries before interpretation.
/// Marketplace noise ("poster", "print") is included alongside articles.
const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "of", "in", "at", "on", "to", "for", "from",
    "by", "with", "poster", "print",
];

/// Generic venue nouns that mark a query as venue-oriented when they appear
/// as whole words.
const DEFAULT_VENUE_KEYWORDS: &[&str] = &[
    "theater", "theatre", "arena", "amphitheater", "amphitheatre",
    "ballroom", "auditorium", "stadium", "pavilion", "coliseum", "hall",
    "club", "garden", "bowl", "palace", "opera", "fieldhouse", "casino",
    "fairgrounds", "lounge",
];

/// Well-known venue names matched as substrings anywhere in the query.
const DEFAULT_SPECIFIC_VENUES: &[&str] = &[
    "red rocks",
    "madison square garden",
    "hollywood bowl",
    "fillmore",
    "ryman",
    "greek theatre",
    "the gorge",
    "shoreline",
    "alpine valley",
    "hampton coliseum",
    "deer creek",
];

/// Single-word cities that frequently appear in poster queries.
const DEFAULT_COMMON_CITIES: &[&str] = &[
    "seattle", "portland", "denver", "chicago", "austin", "nashville",
    "boston", "atlanta", "philadelphia", "minneapolis", "detroit",
    "cleveland", "dallas", "houston", "phoenix", "miami", "orlando",
    "tampa", "charlotte", "pittsburgh", "columbus", "indianapolis",
    "milwaukee", "sacramento", "oakland", "berkeley", "tucson",
    "albuquerque", "memphis", "louisville", "richmond", "buffalo",
    "brooklyn",
];

/// Multi-word city names that must be recognized as a single city token.
const DEFAULT_MULTI_WORD_CITIES: &[&str] = &[
    "new york",
    "new york city",
    "san francisco",
    "los angeles",
    "las vegas",
    "new orleans",
    "san diego",
    "san jose",
    "santa barbara",
    "santa cruz",
    "salt lake city",
    "kansas city",
    "oklahoma city",
    "st louis",
    "saint louis",
    "st paul",
    "saint paul",
    "ann arbor",
    "chapel hill",
    "asbury park",
    "atlantic city",
    "grand rapids",
    "des moines",
    "baton rouge",
    "colorado springs",
    "long beach",
    "east troy",
    "noblesville",
];

/// Immutable search policy, loaded once at startup.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Tokens removed by the sanitizer (lowercase)
    pub stop_words: HashSet<String>,
    /// Generic venue nouns (lowercase)
    pub venue_keywords: Vec<String>,
    /// Well-known venue names, substring-matched (lowercase)
    pub specific_venues: Vec<String>,
    /// Single-word city names (lowercase)
    pub common_cities: Vec<String>,
    /// Multi-word city names (lowercase)
    pub multi_word_cities: Vec<String>,
    /// Similarity thresholds per matching context
    pub thresholds: Thresholds,
    /// Result-set caps
    pub caps: ResultCaps,
    /// Word-boundary patterns over venue keywords + common cities,
    /// compiled once at construction
    venue_word_set: RegexSet,
    /// Word-boundary patterns over multi-word city names
    city_word_set: RegexSet,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::build(
            DEFAULT_STOP_WORDS.iter().map(|s| s.to_string()).collect(),
            to_vec(DEFAULT_VENUE_KEYWORDS),
            to_vec(DEFAULT_SPECIFIC_VENUES),
            to_vec(DEFAULT_COMMON_CITIES),
            to_vec(DEFAULT_MULTI_WORD_CITIES),
            Thresholds::default(),
            ResultCaps::default(),
        )
    }
}

fn to_vec(words: &[&str]) -> Vec<String> {
    words.iter().map(|s| s.to_string()).collect()
}

/// Optional overrides parsed from a TOML config file.
/// Absent fields keep their compiled defaults.
#[derive(Debug, Default, Deserialize)]
struct TomlOverrides {
    stop_words: Option<Vec<String>>,
    venue_keywords: Option<Vec<String>>,
    specific_venues: Option<Vec<String>>,
    common_cities: Option<Vec<String>>,
    multi_word_cities: Option<Vec<String>>,
    thresholds: Option<Thresholds>,
    caps: Option<ResultCaps>,
}

impl SearchConfig {
    /// Load configuration from a TOML file, merging overrides onto defaults.
    ///
    /// A missing or invalid file logs a warning and returns the defaults;
    /// startup is never blocked by configuration problems.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Search config not readable at {:?} ({}), using defaults", path, e);
                return Self::default();
            }
        };

        match Self::from_toml_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("Search config at {:?} invalid ({}), using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Parse a TOML document of overrides and merge onto defaults.
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let overrides: TomlOverrides =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        let defaults = Self::default();

        Ok(Self::build(
            overrides
                .stop_words
                .map(|words| words.into_iter().map(|w| w.to_lowercase()).collect())
                .unwrap_or(defaults.stop_words),
            lower_or(overrides.venue_keywords, defaults.venue_keywords),
            lower_or(overrides.specific_venues, defaults.specific_venues),
            lower_or(overrides.common_cities, defaults.common_cities),
            lower_or(overrides.multi_word_cities, defaults.multi_word_cities),
            overrides.thresholds.unwrap_or(defaults.thresholds),
            overrides.caps.unwrap_or(defaults.caps),
        ))
    }

    fn build(
        stop_words: HashSet<String>,
        venue_keywords: Vec<String>,
        specific_venues: Vec<String>,
        common_cities: Vec<String>,
        multi_word_cities: Vec<String>,
        thresholds: Thresholds,
        caps: ResultCaps,
    ) -> Self {
        let venue_word_set = compile_word_set(
            venue_keywords.iter().chain(common_cities.iter()),
        );
        let city_word_set = compile_word_set(multi_word_cities.iter());

        Self {
            stop_words,
            venue_keywords,
            specific_venues,
            common_cities,
            multi_word_cities,
            thresholds,
            caps,
            venue_word_set,
            city_word_set,
        }
    }

    /// Word-boundary matcher over venue keywords and common city names
    pub fn venue_word_set(&self) -> &RegexSet {
        &self.venue_word_set
    }

    /// Word-boundary matcher over multi-word city names
    pub fn city_word_set(&self) -> &RegexSet {
        &self.city_word_set
    }
}

/// Compile case-insensitive word-boundary patterns for a word list.
/// Every word is regex-escaped, so compilation cannot fail on list content.
fn compile_word_set<'a>(words: impl Iterator<Item = &'a String>) -> RegexSet {
    let patterns: Vec<String> = words
        .map(|word| format!(r"(?i)\b{}\b", regex::escape(word)))
        .collect();
    RegexSet::new(&patterns).expect("escaped word-boundary patterns are valid regexes")
}

fn lower_or(overrides: Option<Vec<String>>, defaults: Vec<String>) -> Vec<String> {
    overrides
        .map(|words| words.into_iter().map(|w| w.to_lowercase()).collect())
        .unwrap_or(defaults)
}
