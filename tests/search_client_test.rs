mod common;

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use weatherbeats::{
    management::StaticToken,
    spotify::{
        SpotifyError,
        search::{SpotifySearchClient, TrackSearch},
    },
};

use common::spawn_server;

#[derive(Clone, Default)]
struct Seen {
    params: Arc<Mutex<Vec<HashMap<String, String>>>>,
    auth: Arc<Mutex<Vec<String>>>,
}

fn search_body() -> Value {
    json!({
        "tracks": {
            "items": [
                {
                    "id": "t1",
                    "name": "Here Comes the Rain Again",
                    "artists": [{ "name": "Eurythmics" }],
                    "album": { "name": "Touch" },
                    "duration_ms": 303000,
                    "explicit": false,
                    "preview_url": "https://p.scdn.co/mp3-preview/t1",
                    "external_urls": { "spotify": "https://open.spotify.com/track/t1" }
                },
                {
                    "id": "t2",
                    "name": "Broken Entry",
                    "artists": []
                },
                null,
                {
                    "id": "t3",
                    "name": "Umbrella",
                    "artists": [{ "name": "Rihanna" }, { "name": "JAY-Z" }],
                    "explicit": true,
                    "preview_url": null
                }
            ]
        }
    })
}

async fn search_ok(
    State(seen): State<Seen>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<Value> {
    seen.params.lock().unwrap().push(params);
    if let Some(auth) = headers.get("authorization").and_then(|h| h.to_str().ok()) {
        seen.auth.lock().unwrap().push(auth.to_string());
    }
    Json(search_body())
}

async fn client_for(router: Router) -> SpotifySearchClient {
    let base = spawn_server(router).await;
    SpotifySearchClient::with_base_url(Arc::new(StaticToken::new("test-token")), base)
}

#[tokio::test]
async fn test_search_returns_normalized_tracks() {
    let seen = Seen::default();
    let router = Router::new()
        .route("/search", get(search_ok))
        .with_state(seen.clone());
    let client = client_for(router).await;

    let tracks = client.search("rain", 20, "DE").await;

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].id, "t1");
    assert_eq!(tracks[0].album_name, "Touch");
    assert_eq!(tracks[0].duration_ms, 303000);
    assert!(tracks[0].preview_available);
    assert_eq!(tracks[0].source_market, "DE");
    assert_eq!(tracks[0].source_query, "rain");

    assert_eq!(tracks[1].artists, vec!["Rihanna", "JAY-Z"]);
    assert!(tracks[1].explicit);
    assert!(!tracks[1].preview_available);
}

#[tokio::test]
async fn test_search_sends_expected_request() {
    let seen = Seen::default();
    let router = Router::new()
        .route("/search", get(search_ok))
        .with_state(seen.clone());
    let client = client_for(router).await;

    client.search("genre:\"rock\"", 200, "FR").await;

    let params = seen.params.lock().unwrap();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0]["q"], "genre:\"rock\"");
    assert_eq!(params[0]["type"], "track");
    assert_eq!(params[0]["limit"], "50");
    assert_eq!(params[0]["market"], "FR");

    let auth = seen.auth.lock().unwrap();
    assert_eq!(auth.as_slice(), ["Bearer test-token"]);
}

fn rate_limited_router() -> Router {
    Router::new().route(
        "/search",
        get(|| async {
            Response::builder()
                .status(StatusCode::TOO_MANY_REQUESTS)
                .header("retry-after", "30")
                .body(axum::body::Body::empty())
                .unwrap()
        }),
    )
}

#[tokio::test]
async fn test_rate_limited_search_is_empty() {
    let client = client_for(rate_limited_router()).await;

    assert!(client.search("rain", 50, "US").await.is_empty());
}

#[tokio::test]
async fn test_rate_limit_is_reported_once_with_retry_after() {
    let client = client_for(rate_limited_router()).await;

    let result = client.try_search("rain", 50, "US").await;

    match result {
        Err(SpotifyError::RateLimited { retry_after }) => {
            assert_eq!(retry_after, Some(Duration::from_secs(30)));
        }
        other => panic!("expected a rate-limit error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_empty() {
    let router = Router::new().route(
        "/search",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response() }),
    );
    let client = client_for(router).await;

    assert!(client.search("rain", 50, "US").await.is_empty());
}

#[tokio::test]
async fn test_unsupported_market_is_empty() {
    let router = Router::new().route(
        "/search",
        get(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": { "status": 400, "message": "Invalid market code" } })),
            )
                .into_response()
        }),
    );
    let client = client_for(router).await;

    assert!(client.search("rain", 50, "ZZ").await.is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_empty() {
    let router = Router::new().route("/search", get(|| async { "not json" }));
    let client = client_for(router).await;

    assert!(client.search("rain", 50, "US").await.is_empty());
}

#[tokio::test]
async fn test_unreachable_host_is_empty() {
    let client = SpotifySearchClient::with_base_url(
        Arc::new(StaticToken::new("test-token")),
        "http://127.0.0.1:9",
    );

    assert!(client.search("rain", 50, "US").await.is_empty());
}
