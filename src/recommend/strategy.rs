//! Static table mapping a weather condition to the search terms used to build
//! catalog queries.

/// Condition used when the weather service reports something the table does not know.
pub const DEFAULT_CONDITION: &str = "clear";

/// Per-condition bundle of search terms. Every list is ordered; earlier entries
/// are queried first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStrategy {
    pub condition: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub genres: &'static [&'static str],
    pub moods: &'static [&'static str],
    pub artists: &'static [&'static str],
    pub keywords: &'static [&'static str],
    pub years: &'static [&'static str],
}

const CLEAR: SearchStrategy = SearchStrategy {
    condition: "clear",
    label: "Sunny Day",
    description: "Bright, upbeat tracks for clear skies.",
    genres: &["pop", "indie pop", "reggae", "funk", "dance"],
    moods: &["happy", "upbeat", "feel good", "summer vibes"],
    artists: &["Pharrell Williams", "Katrina and the Waves", "Bob Marley", "Dua Lipa"],
    keywords: &["sunshine", "sunny", "summer", "good day"],
    years: &["2020-2025", "2010-2019"],
};

const CLOUDS: SearchStrategy = SearchStrategy {
    condition: "clouds",
    label: "Overcast",
    description: "Mellow, reflective tracks for a grey sky.",
    genres: &["indie", "alternative", "dream pop", "trip hop", "soft rock"],
    moods: &["mellow", "chill", "dreamy", "introspective"],
    artists: &["Coldplay", "Radiohead", "The National", "Bon Iver"],
    keywords: &["clouds", "grey sky", "daydream", "drift"],
    years: &["2015-2025", "2000-2014"],
};

const RAIN: SearchStrategy = SearchStrategy {
    condition: "rain",
    label: "Rainy Day",
    description: "Cozy, moody tracks for rainy weather.",
    genres: &["lo-fi", "jazz", "acoustic", "blues", "singer-songwriter"],
    moods: &["melancholy", "cozy", "calm", "rainy day"],
    artists: &["Norah Jones", "Chet Baker", "Phoebe Bridgers", "Bon Iver"],
    keywords: &["rain", "raindrops", "storm", "umbrella"],
    years: &["2015-2025", "1990-2014"],
};

const DRIZZLE: SearchStrategy = SearchStrategy {
    condition: "drizzle",
    label: "Drizzle",
    description: "Soft, gentle tracks for a light drizzle.",
    genres: &["acoustic", "folk", "bossa nova", "indie folk"],
    moods: &["gentle", "soft", "peaceful", "relaxing"],
    artists: &["Iron & Wine", "Jack Johnson", "Nick Drake", "Feist"],
    keywords: &["drizzle", "light rain", "mist", "grey morning"],
    years: &["2010-2025", "1970-2009"],
};

const THUNDERSTORM: SearchStrategy = SearchStrategy {
    condition: "thunderstorm",
    label: "Thunderstorm",
    description: "Loud, dramatic tracks for stormy skies.",
    genres: &["rock", "metal", "hard rock", "electronic", "dubstep"],
    moods: &["intense", "dramatic", "powerful", "energetic"],
    artists: &["AC/DC", "Metallica", "Imagine Dragons", "Linkin Park"],
    keywords: &["thunder", "lightning", "storm", "electric"],
    years: &["2010-2025", "1980-2009"],
};

const SNOW: SearchStrategy = SearchStrategy {
    condition: "snow",
    label: "Snow Day",
    description: "Warm, wintry tracks for snowfall.",
    genres: &["ambient", "classical", "indie folk", "chamber pop"],
    moods: &["cozy", "peaceful", "wintry", "warm"],
    artists: &["Sigur Ros", "Ludovico Einaudi", "Fleet Foxes", "Enya"],
    keywords: &["snow", "winter", "cold", "fireplace"],
    years: &["2010-2025", "1990-2009"],
};

const MIST: SearchStrategy = SearchStrategy {
    condition: "mist",
    label: "Misty",
    description: "Atmospheric, hazy tracks for low visibility.",
    genres: &["ambient", "shoegaze", "post-rock", "downtempo"],
    moods: &["atmospheric", "ethereal", "mysterious", "hazy"],
    artists: &["Beach House", "Cocteau Twins", "Massive Attack", "Slowdive"],
    keywords: &["fog", "mist", "haze", "shadows"],
    years: &["2010-2025", "1990-2009"],
};

const STRATEGIES: &[SearchStrategy] = &[CLEAR, CLOUDS, RAIN, DRIZZLE, THUNDERSTORM, SNOW, MIST];

/// Conditions the weather service reports that share a strategy with another one.
const ALIASES: &[(&str, &str)] = &[
    ("sunny", "clear"),
    ("cloudy", "clouds"),
    ("fog", "mist"),
    ("haze", "mist"),
    ("smoke", "mist"),
    ("dust", "mist"),
    ("sand", "mist"),
    ("ash", "mist"),
    ("squall", "thunderstorm"),
    ("tornado", "thunderstorm"),
];

/// All strategies in table order.
pub fn all() -> &'static [SearchStrategy] {
    STRATEGIES
}

/// Resolves a weather condition to its strategy.
///
/// Matching is case-insensitive and ignores surrounding whitespace. Unknown
/// conditions fall back to the [`DEFAULT_CONDITION`] strategy.
pub fn for_condition(condition: &str) -> &'static SearchStrategy {
    lookup(condition).unwrap_or(&STRATEGIES[0])
}

/// Like [`for_condition`] but reports unknown conditions as `None`.
pub fn lookup(condition: &str) -> Option<&'static SearchStrategy> {
    let key = condition.trim().to_lowercase();
    let key = ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, target)| *target)
        .unwrap_or(key.as_str());

    STRATEGIES.iter().find(|s| s.condition == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_strategy_is_first_in_table() {
        assert_eq!(STRATEGIES[0].condition, DEFAULT_CONDITION);
    }

    #[test]
    fn every_alias_points_at_a_known_condition() {
        for (alias, target) in ALIASES {
            assert!(
                STRATEGIES.iter().any(|s| s.condition == *target),
                "alias {alias} targets unknown condition {target}"
            );
        }
    }

    #[test]
    fn every_strategy_has_terms_in_each_list() {
        for s in STRATEGIES {
            assert!(!s.genres.is_empty(), "{}", s.condition);
            assert!(!s.moods.is_empty(), "{}", s.condition);
            assert!(!s.artists.is_empty(), "{}", s.condition);
            assert!(!s.keywords.is_empty(), "{}", s.condition);
            assert!(!s.years.is_empty(), "{}", s.condition);
        }
    }
}
