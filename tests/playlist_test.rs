mod common;

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use weatherbeats::{
    management::StaticToken,
    spotify::{
        SpotifyError,
        playlist::{PlaylistHandle, PlaylistPublisher, SpotifyPlaylistPublisher, publish},
    },
};

use common::{spawn_server, tracks};

#[derive(Clone, Default)]
struct Remote {
    base: Arc<Mutex<String>>,
    created: Arc<Mutex<Vec<(String, Value)>>>,
    added: Arc<Mutex<Vec<(String, Vec<String>)>>>,
    rate_limit_once: Arc<AtomicUsize>,
}

async fn create_playlist(
    State(remote): State<Remote>,
    Path(owner): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let name = body["name"].as_str().unwrap_or_default().to_string();
    remote.created.lock().unwrap().push((owner, body));
    Json(json!({
        "id": "pl1",
        "name": name,
        "external_urls": { "spotify": "https://open.spotify.com/playlist/pl1" }
    }))
}

async fn add_tracks(
    State(remote): State<Remote>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let limited = remote
        .rate_limit_once
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok();
    if limited {
        return (StatusCode::TOO_MANY_REQUESTS, [("retry-after", "0")], "slow down").into_response();
    }

    let uris = body["uris"]
        .as_array()
        .map(|uris| {
            uris.iter()
                .filter_map(|u| u.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();
    remote.added.lock().unwrap().push((id, uris));
    Json(json!({ "snapshot_id": "snap" })).into_response()
}

async fn my_playlists(
    State(remote): State<Remote>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let base = remote.base.lock().unwrap().clone();
    let playlist = |id: &str, name: &str| json!({ "id": id, "name": name, "snapshot_id": "s" });

    match params.get("page").map(String::as_str) {
        Some("2") => Json(json!({
            "items": [playlist("p3", "WeatherBeats: Rainy Day Mix 2026-10-16")],
            "next": null
        })),
        _ => Json(json!({
            "items": [playlist("p1", "Road Trip"), playlist("p2", "Focus")],
            "next": format!("{}/me/playlists?limit=50&page=2", base)
        })),
    }
}

async fn remote_publisher(remote: &Remote) -> SpotifyPlaylistPublisher {
    let router = Router::new()
        .route("/users/{owner}/playlists", post(create_playlist))
        .route("/playlists/{id}/tracks", post(add_tracks))
        .route("/me/playlists", get(my_playlists))
        .with_state(remote.clone());
    let base = spawn_server(router).await;
    *remote.base.lock().unwrap() = base.clone();

    SpotifyPlaylistPublisher::with_base_url(Arc::new(StaticToken::new("test-token")), base)
}

#[tokio::test]
async fn test_publish_creates_playlist_and_adds_tracks_in_chunks() {
    let remote = Remote::default();
    let publisher = remote_publisher(&remote).await;
    let list = tracks("t", 250);

    let handle = publish(&publisher, "alice", "Rainy Mix", "For rain", false, &list)
        .await
        .unwrap();

    assert_eq!(handle.id, "pl1");
    assert_eq!(handle.name, "Rainy Mix");
    assert_eq!(
        handle.url.as_deref(),
        Some("https://open.spotify.com/playlist/pl1")
    );

    let created = remote.created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].0, "alice");
    assert_eq!(created[0].1["public"], json!(false));
    assert_eq!(created[0].1["description"], json!("For rain"));

    let added = remote.added.lock().unwrap();
    let sizes: Vec<_> = added.iter().map(|(_, uris)| uris.len()).collect();
    assert_eq!(sizes, vec![100, 100, 50]);
    assert!(added.iter().all(|(id, _)| id == "pl1"));

    let sent: Vec<_> = added.iter().flat_map(|(_, uris)| uris.clone()).collect();
    let expected: Vec<_> = list.iter().map(|t| t.uri()).collect();
    assert_eq!(sent, expected);
    assert_eq!(sent[0], "spotify:track:t-0");
}

#[tokio::test]
async fn test_rate_limited_add_is_retried() {
    let remote = Remote::default();
    remote.rate_limit_once.store(1, Ordering::SeqCst);
    let publisher = remote_publisher(&remote).await;
    let handle = PlaylistHandle {
        id: "pl1".to_string(),
        name: "Mix".to_string(),
        url: None,
    };

    publisher
        .add_tracks(&handle, &["spotify:track:a".to_string()])
        .await
        .unwrap();

    let added = remote.added.lock().unwrap();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].1, vec!["spotify:track:a"]);
}

#[tokio::test]
async fn test_exists_walks_every_page() {
    let remote = Remote::default();
    let publisher = remote_publisher(&remote).await;

    assert!(publisher.exists("Focus").await.unwrap());
    assert!(
        publisher
            .exists("WeatherBeats: Rainy Day Mix 2026-10-16")
            .await
            .unwrap()
    );
    assert!(!publisher.exists("Nope").await.unwrap());
}

#[tokio::test]
async fn test_create_failure_is_reported() {
    let router = Router::new().route(
        "/users/{owner}/playlists",
        post(|| async { (StatusCode::FORBIDDEN, "insufficient scope") }),
    );
    let base = spawn_server(router).await;
    let publisher =
        SpotifyPlaylistPublisher::with_base_url(Arc::new(StaticToken::new("test-token")), base);

    let result = publish(&publisher, "alice", "Mix", "", true, &tracks("x", 3)).await;

    match result {
        Err(SpotifyError::Status { status, body }) => {
            assert_eq!(status, reqwest::StatusCode::FORBIDDEN);
            assert_eq!(body, "insufficient scope");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

/// Records calls without talking to any server.
#[derive(Default)]
struct RecordingPublisher {
    add_calls: AtomicUsize,
}

#[async_trait]
impl PlaylistPublisher for RecordingPublisher {
    async fn create_playlist(
        &self,
        _owner_id: &str,
        name: &str,
        _description: &str,
        _is_public: bool,
    ) -> Result<PlaylistHandle, SpotifyError> {
        Ok(PlaylistHandle {
            id: "local".to_string(),
            name: name.to_string(),
            url: None,
        })
    }

    async fn add_tracks(
        &self,
        _playlist: &PlaylistHandle,
        _track_uris: &[String],
    ) -> Result<(), SpotifyError> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::test]
async fn test_publish_without_tracks_only_creates() {
    let publisher = RecordingPublisher::default();

    let handle = publish(&publisher, "alice", "Empty", "", false, &[])
        .await
        .unwrap();

    assert_eq!(handle.name, "Empty");
    assert_eq!(publisher.add_calls.load(Ordering::SeqCst), 0);
}
