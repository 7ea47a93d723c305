use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;
use tokio_util::sync::CancellationToken;

use crate::{
    Res, config, error, info,
    recommend::{Assembler, RecommendationError, RecommendationRequest, SearchStrategy, strategy},
    spotify::search::SpotifySearchClient,
    success,
    types::{Track, TrackTableRow},
    warning,
    weather::WeatherClient,
};

use super::{auth::credentials, interrupt::interrupt_token};

/// Where the weather condition comes from: given directly or looked up by coordinates.
#[derive(Debug, Clone, Default)]
pub struct WeatherSelection {
    pub condition: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct RecommendOptions {
    pub weather: WeatherSelection,
    pub count: Option<usize>,
    /// `None` when neither `--allow-explicit` nor `--no-explicit` was given.
    pub allow_explicit: Option<bool>,
    pub locale: Option<String>,
}

impl RecommendOptions {
    /// The explicit-content choice from the flags, or `default` without one.
    pub fn allow_explicit_or(&self, default: bool) -> bool {
        self.allow_explicit.unwrap_or(default)
    }
}

/// Outcome of one successful assembly, as shown to the user.
pub(crate) struct Assembled {
    pub condition: String,
    pub strategy: &'static SearchStrategy,
    pub request: RecommendationRequest,
    pub tracks: Vec<Track>,
}

pub async fn recommend(opts: RecommendOptions, json: bool) {
    let cancel = interrupt_token();
    let assembled = match assemble(&opts, !json, &cancel).await {
        Ok(assembled) => assembled,
        Err(e) => error!("{}", failure_message(e.as_ref())),
    };

    if json {
        match serde_json::to_string_pretty(&assembled.tracks) {
            Ok(out) => println!("{}", out),
            Err(e) => error!("Failed to serialize tracks: {}", e),
        }
        return;
    }

    print_tracks(&assembled);
}

pub(crate) fn print_tracks(assembled: &Assembled) {
    let rows: Vec<TrackTableRow> = assembled.tracks.iter().map(TrackTableRow::from).collect();
    println!(
        "Weather: {condition}\tMix: {label}\n{table}\n",
        condition = assembled.condition,
        label = assembled.strategy.label,
        table = Table::new(rows)
    );

    let found = assembled.tracks.len();
    let desired = assembled.request.desired_count;
    if found < desired {
        warning!(
            "Found only {} of {} requested tracks. Showing what was available.",
            found,
            desired
        );
    } else {
        success!("Found {} tracks", found);
    }
}

/// Resolves the weather, then runs the assembler with a spinner until done or
/// until `cancel` fires.
pub(crate) async fn assemble(
    opts: &RecommendOptions,
    show_progress: bool,
    cancel: &CancellationToken,
) -> Res<Assembled> {
    let condition = resolve_condition(&opts.weather, show_progress).await?;
    let strategy = strategy::for_condition(&condition);
    if strategy::lookup(&condition).is_none() {
        warning!(
            "Unknown weather condition '{}', using the {} mix",
            condition,
            strategy.label
        );
    }

    let request = RecommendationRequest::new(
        condition.clone(),
        opts.count.unwrap_or_else(config::default_track_count),
        opts.allow_explicit_or(config::default_allow_explicit()),
    )?;

    let locale = opts.locale.clone().or_else(config::locale_hint);
    let search = SpotifySearchClient::new(credentials().await?);

    let assembler = Assembler::new(search)
        .with_locale(locale)
        .with_call_delay(config::call_delay())
        .with_cancellation(cancel.clone());

    let pb = show_progress.then(|| spinner(&format!("Finding {} tracks...", strategy.label)));
    let result = assembler.assemble(&request).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    Ok(Assembled {
        condition,
        strategy,
        request,
        tracks: result?,
    })
}

async fn resolve_condition(selection: &WeatherSelection, verbose: bool) -> Res<String> {
    if let Some(condition) = &selection.condition {
        return Ok(condition.clone());
    }

    let (Some(lat), Some(lon)) = (selection.lat, selection.lon) else {
        return Err("Provide either --condition or both --lat and --lon".into());
    };

    if verbose {
        info!("Looking up the weather at {:.3}, {:.3}...", lat, lon);
    }
    let client = WeatherClient::new(config::weather_api_key()?);
    Ok(client.current_condition(lat, lon).await?)
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

/// User-facing text for a failed run. Each assembly failure points at a
/// different fix: retry later, or relax the content filter.
pub fn failure_message(err: &(dyn std::error::Error + Send + Sync + 'static)) -> String {
    match err.downcast_ref::<RecommendationError>() {
        Some(RecommendationError::NoTracksFound) => {
            "Unable to generate recommendations: the catalog returned nothing. Please try again later."
                .to_string()
        }
        Some(RecommendationError::NoTracksAfterFiltering { found }) => format!(
            "Found {} tracks but every one of them is explicit. Re-run with --allow-explicit to include them.",
            found
        ),
        Some(RecommendationError::Cancelled) => "Cancelled.".to_string(),
        _ => err.to_string(),
    }
}
