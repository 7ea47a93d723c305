use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// A normalized catalog entry produced by the search client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artists: Vec<String>,
    pub album_name: String,
    pub duration_ms: u64,
    pub explicit: bool,
    pub external_url: String,
    pub preview_available: bool,
    pub source_market: String,
    pub source_query: String,
}

impl Track {
    /// Provider URI used when adding the track to a playlist.
    pub fn uri(&self) -> String {
        format!("spotify:track:{}", self.id)
    }

    pub fn primary_artist(&self) -> &str {
        self.artists.first().map(String::as_str).unwrap_or_default()
    }

    /// Lowercase (first artist, title) pair, used to catch re-releases of the
    /// same recording under a different catalog id.
    pub fn recording_key(&self) -> (String, String) {
        (
            self.primary_artist().to_lowercase(),
            self.title.to_lowercase(),
        )
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub title: String,
    pub artists: String,
    pub album: String,
    pub length: String,
    #[tabled(rename = "E")]
    pub explicit: String,
}

impl From<&Track> for TrackTableRow {
    fn from(track: &Track) -> Self {
        let seconds = track.duration_ms / 1000;
        Self {
            title: track.title.clone(),
            artists: track.artists.join(", "),
            album: track.album_name.clone(),
            length: format!("{}:{:02}", seconds / 60, seconds % 60),
            explicit: if track.explicit { "x".into() } else { String::new() },
        }
    }
}

#[derive(Tabled)]
pub struct StrategyTableRow {
    pub condition: String,
    pub label: String,
    pub genres: String,
    pub moods: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<SearchTrackPage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchTrackPage {
    #[serde(default)]
    pub items: Vec<Option<SearchTrackItem>>,
}

/// Raw search hit. Every field is optional because the provider occasionally
/// returns partial entries; these are dropped during normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchTrackItem {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<SearchArtist>,
    pub album: Option<SearchAlbum>,
    pub duration_ms: Option<u64>,
    pub explicit: Option<bool>,
    pub preview_url: Option<String>,
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchArtist {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchAlbum {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub public: Option<bool>,
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserPlaylistsResponse {
    pub items: Vec<Playlist>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub public: Option<bool>,
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherResponse {
    #[serde(default)]
    pub weather: Vec<WeatherEntry>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherEntry {
    pub main: String,
    pub description: Option<String>,
}
