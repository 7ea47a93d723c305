use std::sync::Arc;

use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tokio::sync::Mutex;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use weatherbeats::{
    cli::{self, RecommendOptions, WeatherSelection},
    config, error,
    types::PkceToken,
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Recommend tracks for the current weather
    Recommend(RecommendArgs),

    /// Recommend tracks and save them as a Spotify playlist
    Playlist(PlaylistArgs),

    /// Show the market search order for a locale
    Markets(MarketsArgs),

    /// Show the weather to search-term table
    Strategies,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Weather condition to use, e.g. Rain, Clear, Snow
    #[clap(long, conflicts_with_all = ["lat", "lon"])]
    pub condition: Option<String>,

    /// Latitude for a weather lookup
    #[clap(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude for a weather lookup
    #[clap(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Number of tracks to return
    #[clap(long, value_parser = clap::value_parser!(u32).range(1..=500))]
    pub count: Option<u32>,

    /// Include tracks flagged as explicit
    #[clap(long, conflicts_with = "no_explicit")]
    pub allow_explicit: bool,

    /// Leave out explicit tracks, even when WEATHERBEATS_ALLOW_EXPLICIT is set
    #[clap(long)]
    pub no_explicit: bool,

    /// Locale used to pick catalog markets, e.g. fr-FR
    #[clap(long)]
    pub locale: Option<String>,
}

impl From<SelectionArgs> for RecommendOptions {
    fn from(args: SelectionArgs) -> Self {
        RecommendOptions {
            weather: WeatherSelection {
                condition: args.condition,
                lat: args.lat,
                lon: args.lon,
            },
            count: args.count.map(|c| c as usize),
            allow_explicit: match (args.allow_explicit, args.no_explicit) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
            locale: args.locale,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct RecommendArgs {
    #[clap(flatten)]
    pub selection: SelectionArgs,

    /// Print tracks as JSON instead of a table
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistArgs {
    #[clap(flatten)]
    pub selection: SelectionArgs,

    /// Playlist name, defaults to the weather mix and today's date
    #[clap(long)]
    pub name: Option<String>,

    /// Make the playlist public
    #[clap(long)]
    pub public: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct MarketsArgs {
    #[clap(long)]
    locale: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}=warn", env!("CARGO_CRATE_NAME"))));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            if let Err(e) = cli::auth(Arc::clone(&oauth_result)).await {
                error!("{}", e);
            }
        }
        Command::Recommend(opt) => cli::recommend(opt.selection.into(), opt.json).await,
        Command::Playlist(opt) => cli::playlist(opt.selection.into(), opt.name, opt.public).await,
        Command::Markets(opt) => cli::markets(opt.locale),
        Command::Strategies => cli::strategies(),
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
