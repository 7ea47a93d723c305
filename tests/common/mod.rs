#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use axum::Router;
use tokio::net::TcpListener;
use weatherbeats::{spotify::search::TrackSearch, types::Track};

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

// Helper function to create a test track
pub fn track(id: &str, title: &str, artist: &str, explicit: bool) -> Track {
    Track {
        id: id.to_string(),
        title: title.to_string(),
        artists: vec![artist.to_string()],
        album_name: format!("{} album", title),
        duration_ms: 180_000,
        explicit,
        external_url: format!("https://open.spotify.com/track/{}", id),
        preview_available: false,
        source_market: "US".to_string(),
        source_query: "test".to_string(),
    }
}

/// `count` distinct clean tracks whose ids start with `prefix`.
pub fn tracks(prefix: &str, count: usize) -> Vec<Track> {
    (0..count)
        .map(|i| {
            track(
                &format!("{}-{}", prefix, i),
                &format!("{} song {}", prefix, i),
                &format!("{} artist {}", prefix, i),
                false,
            )
        })
        .collect()
}

type Responder = Box<dyn Fn(&str, &str) -> Vec<Track> + Send + Sync>;

/// Search double answering from a closure and recording every call.
pub struct FakeSearch {
    respond: Responder,
    calls: Mutex<Vec<(String, String, usize)>>,
}

impl FakeSearch {
    pub fn new(respond: impl Fn(&str, &str) -> Vec<Track> + Send + Sync + 'static) -> Self {
        Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new(|_, _| Vec::new())
    }

    /// (query, market) of every call, in order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(q, m, _)| (q.clone(), m.clone()))
            .collect()
    }

    pub fn limits(&self) -> Vec<usize> {
        self.calls.lock().unwrap().iter().map(|(_, _, l)| *l).collect()
    }
}

#[async_trait]
impl TrackSearch for FakeSearch {
    async fn search(&self, query: &str, limit: usize, market: &str) -> Vec<Track> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), market.to_string(), limit));
        (self.respond)(query, market)
    }
}
