//! # Spotify Integration Module
//!
//! Thin clients for the parts of the Spotify Web API WeatherBeats needs:
//!
//! ```text
//! Recommendation Assembler / CLI
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE)
//!     ├── Track Search (search endpoint, per market)
//!     └── Playlist Publishing (create, add tracks)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Error handling
//!
//! Search and publishing differ:
//! - [`search`] never fails. A rejected or broken search call is logged and
//!   reported as "no results" so the caller can try another query or market.
//! - [`playlist`] returns [`SpotifyError`]. Publishing is a user action whose
//!   failure (expired login, network) has to be shown to the user. Rate limits
//!   (`429` with `Retry-After`) and `502 Bad Gateway` are retried a few times
//!   before giving up.
//!
//! Bearer tokens are never read from global state here; every client receives a
//! [`crate::management::CredentialProvider`] and asks it for a valid token per call.
//!
//! ## API Coverage
//!
//! - `GET /search` - Track search with `market` and `limit`
//! - `GET /me/playlists` - Duplicate playlist detection
//! - `POST /users/{user_id}/playlists` - Create new playlists
//! - `POST /playlists/{playlist_id}/tracks` - Add tracks to playlists
//! - `POST /api/token` - Token exchange and refresh operations

pub mod auth;
pub mod playlist;
pub mod search;

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use thiserror::Error;
use tokio::time::sleep;

use crate::warning;

/// Retry budget for publishing calls that hit a rate limit or a bad gateway.
const MAX_RETRIES: u32 = 3;

/// Longest `Retry-After` we are willing to wait for.
const MAX_RETRY_AFTER_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Spotify returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Rate limited by Spotify")]
    RateLimited { retry_after: Option<Duration> },
}

/// Sends a request, waiting out `429 Too Many Requests` and `502 Bad Gateway`
/// responses up to [`MAX_RETRIES`] times. Any other non-success status becomes
/// [`SpotifyError::Status`].
pub(crate) async fn send_with_retry(request: RequestBuilder) -> Result<Response, SpotifyError> {
    let mut attempt = 0;

    loop {
        let Some(this_try) = request.try_clone() else {
            return Ok(request.send().await?.error_for_status()?);
        };

        let response = this_try.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let retryable = status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::BAD_GATEWAY;
        if !retryable || attempt >= MAX_RETRIES {
            let body = response.text().await.unwrap_or_default();
            return Err(SpotifyError::Status { status, body });
        }

        let wait = retry_after(&response).unwrap_or(Duration::from_secs(10));
        if wait.as_secs() > MAX_RETRY_AFTER_SECS {
            warning!(
                "Retry after has reached an abnormal high of {} seconds. Try again later.",
                wait.as_secs()
            );
            return Err(SpotifyError::Status {
                status,
                body: String::new(),
            });
        }

        attempt += 1;
        tracing::debug!(%status, attempt, wait_secs = wait.as_secs(), "retrying Spotify request");
        sleep(wait).await;
    }
}

/// Parses the `Retry-After` header (whole seconds).
pub(crate) fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
