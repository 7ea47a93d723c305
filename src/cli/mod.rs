//! # CLI Module
//!
//! User-facing commands. Each command resolves its inputs (flags, then
//! configuration defaults), calls into the library and renders the outcome
//! with the crate's colored output macros and `tabled` tables.
//!
//! ## Commands
//!
//! - [`auth`] - Spotify OAuth login (PKCE), token is cached for later runs
//! - [`recommend`] - Weather-driven track recommendations, as a table or JSON
//! - [`playlist`] - Same recommendations, published as a Spotify playlist
//! - [`markets`] - Market search order for a locale
//! - [`strategies`] - The weather to search-term table
//!
//! ## Outcomes
//!
//! A recommendation run ends in one of four ways and each gets its own message:
//! enough tracks, fewer tracks than requested (a warning, still a success),
//! nothing found anywhere (retry later) and everything removed by the explicit
//! filter (re-run with `--allow-explicit`).
//!
//! ```bash
//! weatherbeats auth
//! weatherbeats recommend --condition rain --count 15
//! weatherbeats recommend --lat 51.05 --lon 3.72 --json
//! weatherbeats playlist --condition snow --public
//! ```

mod auth;
mod info;
mod interrupt;
mod playlist;
mod recommend;

pub use auth::auth;
pub use info::markets;
pub use info::strategies;
pub use playlist::playlist;
pub use recommend::RecommendOptions;
pub use recommend::WeatherSelection;
pub use recommend::failure_message;
pub use recommend::recommend;
