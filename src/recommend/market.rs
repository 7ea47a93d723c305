//! Derives the ordered list of catalog markets to search from a locale hint.

/// Market used when the locale is missing or unknown, and for the last-resort search.
pub const DEFAULT_MARKET: &str = "US";

/// Major markets tried after the resolved one, in priority order.
pub const PRIORITY_MARKETS: &[&str] = &[
    "US", "GB", "CA", "AU", "DE", "FR", "ES", "IT", "NL", "SE", "BR", "MX", "JP",
];

/// Locale or language tag to market. Full tags are matched before bare
/// language subtags.
const LOCALE_MARKETS: &[(&str, &str)] = &[
    ("en-us", "US"),
    ("en-gb", "GB"),
    ("en-ca", "CA"),
    ("en-au", "AU"),
    ("en-nz", "NZ"),
    ("en-ie", "IE"),
    ("en-in", "IN"),
    ("en-za", "ZA"),
    ("fr-fr", "FR"),
    ("fr-ca", "CA"),
    ("fr-be", "BE"),
    ("fr-ch", "CH"),
    ("de-de", "DE"),
    ("de-at", "AT"),
    ("de-ch", "CH"),
    ("es-es", "ES"),
    ("es-mx", "MX"),
    ("es-ar", "AR"),
    ("es-co", "CO"),
    ("es-cl", "CL"),
    ("pt-br", "BR"),
    ("pt-pt", "PT"),
    ("it-it", "IT"),
    ("nl-nl", "NL"),
    ("nl-be", "BE"),
    ("sv-se", "SE"),
    ("nb-no", "NO"),
    ("da-dk", "DK"),
    ("fi-fi", "FI"),
    ("pl-pl", "PL"),
    ("ja-jp", "JP"),
    ("ko-kr", "KR"),
    ("tr-tr", "TR"),
    ("en", "US"),
    ("fr", "FR"),
    ("de", "DE"),
    ("es", "ES"),
    ("pt", "BR"),
    ("it", "IT"),
    ("nl", "NL"),
    ("sv", "SE"),
    ("nb", "NO"),
    ("no", "NO"),
    ("da", "DK"),
    ("fi", "FI"),
    ("pl", "PL"),
    ("ja", "JP"),
    ("ko", "KR"),
    ("tr", "TR"),
];

/// Maps a locale hint to a single market code, falling back to [`DEFAULT_MARKET`].
///
/// Accepts BCP 47 tags (`fr-FR`) as well as POSIX locale strings
/// (`fr_FR.UTF-8`, `de_DE@euro`).
pub fn resolve_market(locale_hint: Option<&str>) -> &'static str {
    let Some(tag) = locale_hint.map(normalize_tag).filter(|t| !t.is_empty()) else {
        return DEFAULT_MARKET;
    };

    let language = tag.split('-').next().unwrap_or_default();

    find(&tag).or_else(|| find(language)).unwrap_or(DEFAULT_MARKET)
}

/// Returns the resolved market followed by the remaining priority markets.
///
/// The result is never empty and holds no duplicates.
pub fn resolve_markets(locale_hint: Option<&str>) -> Vec<String> {
    let primary = resolve_market(locale_hint);

    std::iter::once(primary)
        .chain(PRIORITY_MARKETS.iter().copied().filter(|m| *m != primary))
        .map(String::from)
        .collect()
}

fn find(tag: &str) -> Option<&'static str> {
    LOCALE_MARKETS
        .iter()
        .find(|(locale, _)| *locale == tag)
        .map(|(_, market)| *market)
}

fn normalize_tag(hint: &str) -> String {
    hint.trim()
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .replace('_', "-")
        .to_lowercase()
}
