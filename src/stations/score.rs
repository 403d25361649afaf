//! Text normalization and the relevance scoring of catalog stations
//! against a query.

use crate::types::station::Station;
use unicode_normalization::UnicodeNormalization;

// --- Scoring weights ---

const EXACT_NAME: f64 = 200.0;
const EXACT_STATION_ID: f64 = 150.0;
const NAME_PREFIX: f64 = 120.0;
const TOKEN_EXACT: f64 = 80.0;
const TOKEN_PREFIX: f64 = 40.0;
const TOKEN_SUBSTRING: f64 = 20.0;
const TOKEN_COUNTRY: f64 = 30.0;
const SHORT_NAME_BONUS: f64 = 10.0;

/// Canonicalizes text for matching: NFKD decomposition, combining
/// diacritical marks stripped, lowercased and trimmed.
///
/// # Examples
///
/// ```
/// use stationcast::normalize;
///
/// assert_eq!(normalize("  Zürich "), "zurich");
/// assert_eq!(normalize("SÃO PAULO"), "sao paulo");
/// ```
pub fn normalize(text: &str) -> String {
    text.nfkd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// Relevance score of one station for a normalized query and its
/// whitespace tokens. Every matching condition accumulates:
///
/// - whole-query exact, station-identifier and prefix matches on the name
/// - per-token exact, prefix and substring matches on the name
/// - per-token exact matches on the country
/// - a small bonus favoring shorter names, independent of any match
///
/// The result is the rounded sum; a station scoring 0 is excluded from
/// suggestions entirely.
pub fn score_station(station: &Station, query: &str, tokens: &[String]) -> u32 {
    let name = normalize(&station.name);
    let mut score = 0.0;

    // Strong whole-query matches.
    if name == query {
        score += EXACT_NAME;
    }
    if station.station_id == query {
        score += EXACT_STATION_ID;
    }
    if name.starts_with(query) {
        score += NAME_PREFIX;
    }

    // Partial per-token matches.
    for token in tokens {
        if &name == token {
            score += TOKEN_EXACT;
        }
        if name.starts_with(token.as_str()) {
            score += TOKEN_PREFIX;
        }
        if name.contains(token.as_str()) {
            score += TOKEN_SUBSTRING;
        }
        if normalize(&station.country) == *token {
            score += TOKEN_COUNTRY;
        }
    }

    // Prefer concise names; never negative.
    let name_len = name.chars().count() as f64;
    score += (SHORT_NAME_BONUS - name_len / 20.0).max(0.0);

    score.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(name: &str, country: &str, station_id: &str) -> Station {
        Station {
            id: format!("test-{}", station_id),
            name: name.to_string(),
            country: country.to_string(),
            station_id: station_id.to_string(),
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    fn tokens(query: &str) -> Vec<String> {
        query.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_normalize_strips_diacritics_and_case() {
        assert_eq!(normalize("Zürich"), "zurich");
        assert_eq!(normalize("  Kraków  "), "krakow");
        assert_eq!(normalize("REYKJAVÍK"), "reykjavik");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_exact_name_match_accumulates_all_name_rows() {
        let leipzig = station("Leipzig", "Germany", "2231");
        // 200 exact + 120 prefix + 80 token exact + 40 token prefix
        // + 20 token substring + round(10 - 7/20) length bonus.
        assert_eq!(score_station(&leipzig, "leipzig", &tokens("leipzig")), 470);
    }

    #[test]
    fn test_prefix_query_scores_prefix_and_token_rows() {
        let leipzig = station("Leipzig", "Germany", "2231");
        // 120 prefix + 40 token prefix + 20 token substring + length bonus.
        assert_eq!(score_station(&leipzig, "leip", &tokens("leip")), 190);
    }

    #[test]
    fn test_station_identifier_matches_the_whole_query() {
        let leipzig = station("Leipzig", "Germany", "2231");
        // 150 identifier + length bonus.
        assert_eq!(score_station(&leipzig, "2231", &tokens("2231")), 160);
    }

    #[test]
    fn test_country_matches_per_token() {
        let leipzig = station("Leipzig", "Germany", "2231");
        // 30 country token + length bonus.
        assert_eq!(score_station(&leipzig, "germany", &tokens("germany")), 40);
    }

    #[test]
    fn test_multi_token_queries_accumulate_per_token() {
        let leipzig = station("Leipzig", "Germany", "2231");
        // Token "leipzig": 80 + 40 + 20; token "germany": 30 country;
        // whole query "leipzig germany" matches no name row; length bonus.
        assert_eq!(
            score_station(&leipzig, "leipzig germany", &tokens("leipzig germany")),
            180
        );
    }

    #[test]
    fn test_diacritics_do_not_block_matches() {
        let zurich = station("Zürich", "Switzerland", "3700");
        let score = score_station(&zurich, "zurich", &tokens("zurich"));
        // Exact + prefix + token rows all fire on the folded name.
        assert!(score >= 460);
    }

    #[test]
    fn test_unrelated_short_names_keep_only_the_length_bonus() {
        let bern = station("Bern", "Switzerland", "3011");
        assert_eq!(score_station(&bern, "leipzig", &tokens("leipzig")), 10);
    }

    #[test]
    fn test_very_long_names_can_score_zero() {
        let long_name = "x".repeat(200);
        let s = station(&long_name, "Nowhere", "9999");
        assert_eq!(score_station(&s, "leipzig", &tokens("leipzig")), 0);
    }
}
