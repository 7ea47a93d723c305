use tabled::Table;

use crate::{
    config,
    recommend::{MAX_MARKETS_PER_QUERY, resolve_markets, strategy},
    types::StrategyTableRow,
};

/// Prints the market order a run would use for this locale.
pub fn markets(locale: Option<String>) {
    let hint = locale.or_else(config::locale_hint);
    let markets = resolve_markets(hint.as_deref());

    println!(
        "Locale: {}\nSearched per query: {}\nPriority: {}",
        hint.as_deref().unwrap_or("(none)"),
        markets
            .iter()
            .take(MAX_MARKETS_PER_QUERY)
            .cloned()
            .collect::<Vec<_>>()
            .join(", "),
        markets.join(", ")
    );
}

pub fn strategies() {
    let rows: Vec<StrategyTableRow> = strategy::all()
        .iter()
        .map(|s| StrategyTableRow {
            condition: s.condition.to_string(),
            label: s.label.to_string(),
            genres: s.genres.join(", "),
            moods: s.moods.join(", "),
        })
        .collect();

    println!("{}", Table::new(rows));
}
