//! Candidate term generation from tokenized queries
//!
//! Produces the artist/venue/city substrings a query could plausibly be
//! split into. Candidate lists are order-sensitive: more specific guesses
//! go first and the executors try them until one yields rows.

use crate::config::SearchConfig;

/// One hypothesis about splitting a query into an artist and a city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistCityCandidate {
    pub artist: String,
    pub city: String,
}

/// Generate candidate artist substrings from a tokenized term.
///
/// The full term is always a candidate. Longer queries also contribute
/// leading-token prefixes; a term that looks like a multi-artist query (not
/// venue-likely, more than one token) contributes each token individually.
pub fn generate_potential_artist_terms(
    term: &str,
    tokens: &[String],
    venue_likely: bool,
) -> Vec<String> {
    let mut candidates = vec![term.to_string()];

    if tokens.len() >= 3 {
        push_unique(&mut candidates, tokens[..2].join(" "));
        push_unique(&mut candidates, tokens[0].clone());
        push_unique(&mut candidates, tokens[..tokens.len() - 1].join(" "));
    }

    if !venue_likely && tokens.len() > 1 {
        for token in tokens {
            if token.chars().count() >= 2 {
                push_unique(&mut candidates, token.clone());
            }
        }
    }

    candidates
}

/// Generate candidate venue substrings from a tokenized term.
///
/// Venue names tend to trail the query ("phish red rocks"), so candidates
/// are suffixes: everything after the first one or two tokens, the last
/// token alone, and the full term.
pub fn generate_potential_venue_terms(term: &str, tokens: &[String]) -> Vec<String> {
    let mut candidates = Vec::new();

    if tokens.len() >= 3 {
        push_unique(&mut candidates, tokens[2..].join(" "));
    }

    if tokens.len() >= 2 {
        push_unique(&mut candidates, tokens[1..].join(" "));
        push_unique(&mut candidates, tokens[tokens.len() - 1].clone());
        push_unique(&mut candidates, term.to_string());
    }

    candidates
}

/// Generate candidate artist/city splits for a term with no year in it.
///
/// Base candidates split on the last token (city) and the first token
/// (artist). When a configured multi-word city name appears in the term,
/// that split is inserted at the front of the list so it is tried first.
pub fn generate_artist_city_combinations(
    term_without_year: &str,
    config: &SearchConfig,
) -> Vec<ArtistCityCandidate> {
    let lower = term_without_year.to_lowercase();
    let tokens: Vec<&str> = lower.split_whitespace().collect();
    if tokens.len() < 2 {
        return Vec::new();
    }

    let mut combinations = vec![
        ArtistCityCandidate {
            artist: tokens[..tokens.len() - 1].join(" "),
            city: tokens[tokens.len() - 1].to_string(),
        },
        ArtistCityCandidate {
            artist: tokens[0].to_string(),
            city: tokens[1..].join(" "),
        },
    ];

    // Known multi-word cities take priority over naive token splits
    for city in &config.multi_word_cities {
        if let Some(artist) = strip_word_bounded(&lower, city) {
            if !artist.is_empty() {
                let candidate = ArtistCityCandidate {
                    artist,
                    city: city.clone(),
                };
                combinations.retain(|c| *c != candidate);
                combinations.insert(0, candidate);
            }
        }
    }

    dedup_in_order(combinations)
}

/// Remove a word-bounded occurrence of `needle` from `haystack`, returning
/// the collapsed remainder, or `None` when `needle` does not occur as a
/// whole word.
fn strip_word_bounded(haystack: &str, needle: &str) -> Option<String> {
    let mut from = 0;
    while let Some(offset) = haystack[from..].find(needle) {
        let start = from + offset;
        let end = start + needle.len();
        let bounded_left = start == 0
            || haystack[..start]
                .chars()
                .next_back()
                .is_some_and(|c| !c.is_alphanumeric());
        let bounded_right = end == haystack.len()
            || haystack[end..].chars().next().is_some_and(|c| !c.is_alphanumeric());

        if bounded_left && bounded_right {
            let mut remainder = String::with_capacity(haystack.len());
            remainder.push_str(&haystack[..start]);
            remainder.push(' ');
            remainder.push_str(&haystack[end..]);
            return Some(remainder.split_whitespace().collect::<Vec<_>>().join(" "));
        }
        from = end;
    }
    None
}

fn push_unique(candidates: &mut Vec<String>, candidate: String) {
    if !candidates.contains(&candidate) {
        candidates.push(candidate);
    }
}

fn dedup_in_order(combinations: Vec<ArtistCityCandidate>) -> Vec<ArtistCityCandidate> {
    let mut unique: Vec<ArtistCityCandidate> = Vec::with_capacity(combinations.len());
    for combination in combinations {
        if !unique.contains(&combination) {
            unique.push(combination);
        }
    }
    unique
}
