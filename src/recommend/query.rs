//! Builds the ordered search query lists driven by a [`SearchStrategy`].

use super::strategy::SearchStrategy;

/// High-yield terms queried first to fill the pool quickly.
pub const BROAD_TERMS: &[&str] = &["popular", "hits", "top songs", "chart"];

/// Generic terms queried after every strategy-specific one.
pub const GENERIC_TERMS: &[&str] = &["music", "songs", "trending"];

/// Single-word, high-frequency terms for the fallback tier.
pub const EMERGENCY_TERMS: &[&str] = &[
    "a", "the", "love", "you", "me", "i", "my", "night", "day", "time", "heart", "life",
];

/// Term for the one unrestricted last-resort search.
pub const LAST_RESORT_TERM: &str = "music";

/// Main query list for a strategy.
///
/// Order: broad terms, genres, artists, years, moods, keywords, generic terms.
/// The list is deterministic for a given strategy and holds no duplicates.
pub fn build_queries(strategy: &SearchStrategy) -> Vec<String> {
    let broad = BROAD_TERMS.iter().map(|t| t.to_string());
    let genres = strategy.genres.iter().map(|g| format!("genre:\"{g}\""));
    let artists = strategy.artists.iter().map(|a| format!("artist:\"{a}\""));
    let years = strategy.years.iter().map(|y| format!("year:{y}"));
    let moods = strategy.moods.iter().map(|m| m.to_string());
    let keywords = strategy.keywords.iter().map(|k| k.to_string());
    let generic = GENERIC_TERMS.iter().map(|t| t.to_string());

    let mut queries: Vec<String> = Vec::new();
    for query in broad
        .chain(genres)
        .chain(artists)
        .chain(years)
        .chain(moods)
        .chain(keywords)
        .chain(generic)
    {
        if !queries.contains(&query) {
            queries.push(query);
        }
    }
    queries
}
