use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use super::{SpotifyError, send_with_retry};
use crate::{
    config,
    management::CredentialProvider,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, GetUserPlaylistsResponse, Track,
    },
};

/// Most URIs the add-tracks endpoint accepts per call.
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

/// A playlist created on the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistHandle {
    pub id: String,
    pub name: String,
    pub url: Option<String>,
}

/// Creates and fills remote playlists.
#[async_trait]
pub trait PlaylistPublisher: Send + Sync {
    async fn create_playlist(
        &self,
        owner_id: &str,
        name: &str,
        description: &str,
        is_public: bool,
    ) -> Result<PlaylistHandle, SpotifyError>;

    /// Appends tracks in order. Callers may pass any number of URIs.
    async fn add_tracks(
        &self,
        playlist: &PlaylistHandle,
        track_uris: &[String],
    ) -> Result<(), SpotifyError>;
}

/// Creates a playlist and adds every track to it, in the given order.
pub async fn publish<P: PlaylistPublisher + ?Sized>(
    publisher: &P,
    owner_id: &str,
    name: &str,
    description: &str,
    is_public: bool,
    tracks: &[Track],
) -> Result<PlaylistHandle, SpotifyError> {
    let playlist = publisher
        .create_playlist(owner_id, name, description, is_public)
        .await?;

    let uris: Vec<String> = tracks.iter().map(Track::uri).collect();
    if !uris.is_empty() {
        publisher.add_tracks(&playlist, &uris).await?;
    }

    Ok(playlist)
}

/// [`PlaylistPublisher`] backed by the Spotify Web API.
pub struct SpotifyPlaylistPublisher {
    http_client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl SpotifyPlaylistPublisher {
    pub fn new(credentials: Arc<dyn CredentialProvider>) -> Self {
        Self::with_base_url(credentials, config::spotify_apiurl())
    }

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

    async fn token(&self) -> Result<String, SpotifyError> {
        self.credentials
            .get_valid_token()
            .await
            .map_err(|e| SpotifyError::Auth(e.to_string()))
    }

    /// Checks whether the current user already has a playlist with this name.
    /// Walks every page of `/me/playlists`.
    pub async fn exists(&self, name: &str) -> Result<bool, SpotifyError> {
        let mut next = Some(format!("{}/me/playlists?limit=50", self.base_url));

        while let Some(url) = next {
            let token = self.token().await?;
            let response = send_with_retry(self.http_client.get(&url).bearer_auth(token)).await?;
            let page = response.json::<GetUserPlaylistsResponse>().await?;

            if page.items.iter().any(|p| p.name == name) {
                return Ok(true);
            }
            next = page.next;
        }

        Ok(false)
    }
}

#[async_trait]
impl PlaylistPublisher for SpotifyPlaylistPublisher {
    async fn create_playlist(
        &self,
        owner_id: &str,
        name: &str,
        description: &str,
        is_public: bool,
    ) -> Result<PlaylistHandle, SpotifyError> {
        let token = self.token().await?;
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
            public: is_public,
            collaborative: false,
        };

        let response = send_with_retry(
            self.http_client
                .post(format!("{}/users/{}/playlists", self.base_url, owner_id))
                .bearer_auth(token)
                .json(&body),
        )
        .await?;

        let created = response.json::<CreatePlaylistResponse>().await?;
        tracing::info!(playlist_id = %created.id, "playlist created");

        Ok(PlaylistHandle {
            id: created.id,
            name: created.name,
            url: created.external_urls.and_then(|u| u.spotify),
        })
    }

    async fn add_tracks(
        &self,
        playlist: &PlaylistHandle,
        track_uris: &[String],
    ) -> Result<(), SpotifyError> {
        for chunk in track_uris.chunks(MAX_TRACKS_PER_REQUEST) {
            let token = self.token().await?;
            let body = AddTrackToPlaylistRequest {
                uris: chunk.to_vec(),
            };

            let response = send_with_retry(
                self.http_client
                    .post(format!("{}/playlists/{}/tracks", self.base_url, playlist.id))
                    .bearer_auth(token)
                    .json(&body),
            )
            .await?;

            let added = response.json::<AddTrackToPlaylistResponse>().await?;
            tracing::debug!(snapshot_id = %added.snapshot_id, count = chunk.len(), "tracks added");
        }

        Ok(())
    }
}
