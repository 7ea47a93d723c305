//! WeatherBeats Library
//!
//! This library turns the current weather into music. It resolves a weather
//! condition to a set of search terms, searches the Spotify catalog across
//! several regional markets, assembles a deduplicated and optionally
//! explicit-free track list, and can publish that list as a playlist.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Token storage and the injectable credential provider
//! - `recommend` - Strategy and market tables plus the recommendation assembler
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API clients (auth, search, playlists)
//! - `types` - Data structures and type definitions
//! - `utils` - Deduplication, filtering, shuffling and PKCE helpers
//! - `weather` - Current-weather lookup
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use weatherbeats::{
//!     management::StaticToken,
//!     recommend::{Assembler, RecommendationRequest},
//!     spotify::search::SpotifySearchClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> weatherbeats::Res<()> {
//!     let search = SpotifySearchClient::new(Arc::new(StaticToken::new("BQC...")));
//!     let request = RecommendationRequest::new("Rain", 20, false)?;
//!     let tracks = Assembler::new(search).assemble(&request).await?;
//!     println!("{} tracks", tracks.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod recommend;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod weather;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the outer plumbing (CLI, auth flow, server). Domain code returns
/// typed errors that convert into it with `?`.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line with a blue `o` marker to stdout.
///
/// Accepts the same arguments as `println!`.
///
/// ```
/// info!("Looking up the weather...");
/// info!("Searching {} markets", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a green checkmark line to stdout once something completed.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line to stderr and exits with status 1.
///
/// Only for failures the command cannot recover from; nothing after the
/// macro runs.
///
/// ```
/// error!("Unable to generate recommendations: {}", err);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow `!` line to stderr for recoverable problems the user
/// should notice. Stdout stays clean for `--json` output.
///
/// ```
/// warning!("Found only {} of {} tracks", found, desired);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
