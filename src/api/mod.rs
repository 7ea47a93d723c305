//! # API Module
//!
//! HTTP endpoints served by the short-lived local server that runs during
//! `weatherbeats auth`:
//!
//! - [`callback`] - receives Spotify's OAuth redirect and exchanges the
//!   authorization code (PKCE) for a token
//! - [`health`] - reports status and version, useful to check that the
//!   redirect URI points at a live listener
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use weatherbeats::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
