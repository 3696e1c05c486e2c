//! Lexical classifiers over cleaned query terms
//!
//! Pure functions that detect venue-likelihood, multi-word city names and
//! special-character artist names. Word-boundary matching throughout: a
//! keyword embedded in a longer word ("bowl" in "bowling") never matches.

use crate::config::SearchConfig;

/// Decide whether a term is likely a venue-oriented search.
///
/// True when the term contains a known specific venue name as a substring,
/// any whole-word token equals a venue keyword, or any venue keyword or
/// common city name appears as a whole word anywhere in the string.
pub fn is_likely_venue_search(term: &str, config: &SearchConfig) -> bool {
    let lower = term.to_lowercase();

    if config
        .specific_venues
        .iter()
        .any(|venue| lower.contains(venue.as_str()))
    {
        return true;
    }

    if lower
        .split_whitespace()
        .any(|token| config.venue_keywords.iter().any(|k| k == token))
    {
        return true;
    }

    config.venue_word_set().is_match(&lower)
}

/// Decide whether a term is, or contains, a configured multi-word city name.
///
/// Matching is case-insensitive and word-bounded: extra surrounding words
/// are fine, but a city name embedded in a longer unspaced token is not a
/// match, and neither is a truncated fragment of the city name.
pub fn is_multi_word_city_name(term: &str, config: &SearchConfig) -> bool {
    config.city_word_set().is_match(&term.to_lowercase())
}

/// Detect special-character artist names like "AC/DC".
///
/// True when the term contains non-word characters and no whitespace; a
/// normal multi-word phrase with punctuation is not special.
pub fn has_special_characters(term: &str) -> bool {
    let has_whitespace = term.chars().any(char::is_whitespace);
    let has_non_word = term.chars().any(|c| !c.is_alphanumeric() && c != '_');
    has_non_word && !has_whitespace
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SearchConfig {
        SearchConfig::default()
    }

    #[test]
    fn test_venue_keyword_as_whole_word() {
        assert!(is_likely_venue_search("fox theater oakland", &config()));
        assert!(is_likely_venue_search("red rocks 2019", &config()));
        assert!(is_likely_venue_search("The Arena", &config()));
    }

    #[test]
    fn test_common_city_triggers_venue_likelihood() {
        assert!(is_likely_venue_search("grateful dead seattle", &config()));
    }

    #[test]
    fn test_artist_only_terms_are_not_venue_searches() {
        assert!(!is_likely_venue_search("widespread panic", &config()));
        assert!(!is_likely_venue_search("phish", &config()));
    }

    #[test]
    fn test_embedded_keyword_does_not_match() {
        // "bowling" contains "bowl" but only as a fragment
        assert!(!is_likely_venue_search("bowling for soup", &config()));
        // "clubs" should not be mistaken for whole-word "club"... it is a
        // distinct token, so no match either
        assert!(!is_likely_venue_search("drumclub", &config()));
    }

    #[test]
    fn test_multi_word_city_exact_and_embedded() {
        assert!(is_multi_word_city_name("new york", &config()));
        assert!(is_multi_word_city_name("New York", &config()));
        assert!(is_multi_word_city_name("phish new york 1998", &config()));
        // truncated fragment
        assert!(!is_multi_word_city_name("new", &config()));
        // no word boundary inside an unspaced token
        assert!(!is_multi_word_city_name("mynew yorkish", &config()));
    }

    #[test]
    fn test_special_characters() {
        assert!(has_special_characters("AC/DC"));
        assert!(has_special_characters("GWAR!"));
        assert!(has_special_characters("blink-182"));
        assert!(!has_special_characters("Pearl Jam"));
        assert!(!has_special_characters("phish"));
        // punctuation in a multi-word phrase is not "special"
        assert!(!has_special_characters("crosby, stills"));
    }
}
