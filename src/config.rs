//! Configuration management for WeatherBeats.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage Spotify API
//! credentials, weather service settings, and the default recommendation settings
//! used when a command-line flag is omitted.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_SCOPE: &str =
    "playlist-modify-public playlist-modify-private playlist-read-private";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_TRACK_COUNT: usize = 20;
pub const DEFAULT_CALL_DELAY_MS: u64 = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives under `weatherbeats/.env` in the platform-specific local data
/// directory:
/// - Linux: `~/.local/share/weatherbeats/.env`
/// - macOS: `~/Library/Application Support/weatherbeats/.env`
/// - Windows: `%LOCALAPPDATA%/weatherbeats/.env`
///
/// The directory is created if needed. A missing file is not an error since every
/// setting can also come from the process environment.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file exists but
/// cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| e.to_string())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("weatherbeats/.env");
    path
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    optional(key).ok_or(ConfigError::Missing(key))
}

fn or_default(key: &str, default: &str) -> String {
    optional(key).unwrap_or_else(|| default.to_string())
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    optional(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Address the local OAuth callback server binds to, e.g. `127.0.0.1:8888`.
pub fn server_addr() -> String {
    or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Spotify user that owns created playlists.
pub fn spotify_user() -> Result<String, ConfigError> {
    required("SPOTIFY_USER_ID")
}

/// Client id registered on Spotify's developer platform. Needed for the PKCE flow.
pub fn spotify_client_id() -> Result<String, ConfigError> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Callback URL Spotify redirects to after authorization. Must match the
/// redirect URI registered in the application settings.
pub fn spotify_redirect_uri() -> String {
    or_default(
        "SPOTIFY_API_REDIRECT_URI",
        &format!("http://{}/callback", DEFAULT_SERVER_ADDRESS),
    )
}

pub fn spotify_scope() -> String {
    or_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SPOTIFY_SCOPE)
}

pub fn spotify_apiauth_url() -> String {
    or_default("SPOTIFY_API_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL)
}

/// Base URL for Web API calls (search, playlists).
pub fn spotify_apiurl() -> String {
    or_default("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
}

pub fn spotify_apitoken_url() -> String {
    or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL)
}

/// Pre-issued bearer token. Takes precedence over the cached PKCE token.
pub fn spotify_access_token() -> Option<String> {
    optional("SPOTIFY_ACCESS_TOKEN")
}

pub fn weather_api_url() -> String {
    or_default("WEATHER_API_URL", DEFAULT_WEATHER_API_URL)
}

pub fn weather_api_key() -> Result<String, ConfigError> {
    required("WEATHER_API_KEY")
}

/// Locale hint for market resolution: `WEATHERBEATS_LOCALE`, then `LANG`.
pub fn locale_hint() -> Option<String> {
    optional("WEATHERBEATS_LOCALE").or_else(|| optional("LANG"))
}

pub fn default_track_count() -> usize {
    parsed_or("WEATHERBEATS_TRACK_COUNT", DEFAULT_TRACK_COUNT)
}

pub fn default_allow_explicit() -> bool {
    parsed_or("WEATHERBEATS_ALLOW_EXPLICIT", false)
}

/// Pause inserted between two provider calls during assembly.
pub fn call_delay() -> Duration {
    Duration::from_millis(parsed_or("WEATHERBEATS_CALL_DELAY_MS", DEFAULT_CALL_DELAY_MS))
}
