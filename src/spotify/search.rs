use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::{SpotifyError, retry_after};
use crate::{
    config,
    management::CredentialProvider,
    types::{SearchResponse, SearchTrackItem, Track},
};

/// Largest page the search endpoint serves. Larger requests are capped, not rejected.
pub const MAX_SEARCH_LIMIT: usize = 50;

/// One bounded catalog search in one market.
///
/// Implementations must not fail: anything that prevents results (rate limit,
/// unsupported market, network trouble, no hits) is reported as an empty list.
#[async_trait]
pub trait TrackSearch: Send + Sync {
    async fn search(&self, query: &str, limit: usize, market: &str) -> Vec<Track>;
}

#[async_trait]
impl<T: TrackSearch + ?Sized> TrackSearch for Arc<T> {
    async fn search(&self, query: &str, limit: usize, market: &str) -> Vec<Track> {
        (**self).search(query, limit, market).await
    }
}

/// [`TrackSearch`] backed by the Spotify `/search` endpoint.
pub struct SpotifySearchClient {
    http_client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl SpotifySearchClient {
    pub fn new(credentials: Arc<dyn CredentialProvider>) -> Self {
        Self::with_base_url(credentials, config::spotify_apiurl())
    }

    /// Client pointed at a custom API base URL (tests, proxies).
    pub fn with_base_url(
        credentials: Arc<dyn CredentialProvider>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// One search call that reports why it came back empty.
    ///
    /// [`TrackSearch::search`] wraps this and logs the error instead.
    pub async fn try_search(
        &self,
        query: &str,
        limit: usize,
        market: &str,
    ) -> Result<Vec<Track>, SpotifyError> {
        let token = self
            .credentials
            .get_valid_token()
            .await
            .map_err(|e| SpotifyError::Auth(e.to_string()))?;

        let limit = capped_limit(limit).to_string();
        let response = self
            .http_client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("q", query),
                ("type", "track"),
                ("limit", limit.as_str()),
                ("market", market),
            ])
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SpotifyError::RateLimited {
                retry_after: retry_after(&response),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpotifyError::Status { status, body });
        }

        let body = response.json::<SearchResponse>().await?;
        Ok(normalize_search_response(body, query, market))
    }
}

#[async_trait]
impl TrackSearch for SpotifySearchClient {
    async fn search(&self, query: &str, limit: usize, market: &str) -> Vec<Track> {
        match self.try_search(query, limit, market).await {
            Ok(tracks) => {
                tracing::debug!(query, market, found = tracks.len(), "search finished");
                tracks
            }
            Err(SpotifyError::RateLimited { retry_after }) => {
                tracing::warn!(
                    query,
                    market,
                    retry_after_secs = retry_after.map(|d| d.as_secs()),
                    "search rate limited, treating as empty"
                );
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(query, market, error = %e, "search failed, treating as empty");
                Vec::new()
            }
        }
    }
}

/// Clamps a requested page size into `1..=MAX_SEARCH_LIMIT`.
pub fn capped_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_SEARCH_LIMIT)
}

/// Maps a raw search response to tracks, dropping malformed entries.
pub fn normalize_search_response(response: SearchResponse, query: &str, market: &str) -> Vec<Track> {
    response
        .tracks
        .map(|page| page.items)
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .filter_map(|item| normalize_item(item, query, market))
        .collect()
}

/// An entry without id, without name or without any named artist is malformed.
fn normalize_item(item: SearchTrackItem, query: &str, market: &str) -> Option<Track> {
    let id = item.id.filter(|id| !id.is_empty())?;
    let title = item.name.filter(|name| !name.is_empty())?;
    let artists: Vec<String> = item
        .artists
        .into_iter()
        .filter_map(|a| a.name)
        .filter(|name| !name.is_empty())
        .collect();
    if artists.is_empty() {
        return None;
    }

    Some(Track {
        id,
        title,
        artists,
        album_name: item.album.and_then(|a| a.name).unwrap_or_default(),
        duration_ms: item.duration_ms.unwrap_or(0),
        explicit: item.explicit.unwrap_or(false),
        external_url: item
            .external_urls
            .and_then(|u| u.spotify)
            .unwrap_or_default(),
        preview_available: item.preview_url.is_some_and(|url| !url.is_empty()),
        source_market: market.to_string(),
        source_query: query.to_string(),
    })
}
