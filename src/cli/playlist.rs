use chrono::Local;

use crate::{
    config, error, info,
    spotify::playlist::{SpotifyPlaylistPublisher, publish},
    success, warning,
};

use super::{
    auth::credentials,
    interrupt::{interrupt_token, until_cancelled},
    recommend::{RecommendOptions, assemble, failure_message, print_tracks},
};

pub async fn playlist(opts: RecommendOptions, name: Option<String>, public: bool) {
    let owner = match config::spotify_user() {
        Ok(owner) => owner,
        Err(e) => error!("{}", e),
    };

    let cancel = interrupt_token();
    let assembled = match assemble(&opts, true, &cancel).await {
        Ok(assembled) => assembled,
        Err(e) => error!("{}", failure_message(e.as_ref())),
    };

    print_tracks(&assembled);

    let playlist_name = name.unwrap_or_else(|| {
        format!(
            "WeatherBeats: {} {}",
            assembled.strategy.label,
            Local::now().format("%Y-%m-%d")
        )
    });

    let publisher = match credentials().await {
        Ok(creds) => SpotifyPlaylistPublisher::new(creds),
        Err(e) => error!("{}", e),
    };

    let existing = until_cancelled(&cancel, publisher.exists(&playlist_name)).await;
    let playlist_exists = match existing {
        None => error!("Cancelled. No playlist was created."),
        Some(Ok(exists)) => exists,
        Some(Err(e)) => {
            warning!("Failed to check if playlist exists: {}", e);
            false
        }
    };

    if playlist_exists {
        warning!("Playlist {} already exists", playlist_name);
        return;
    }

    info!("Create playlist {}", playlist_name);

    let published = until_cancelled(
        &cancel,
        publish(
            &publisher,
            &owner,
            &playlist_name,
            assembled.strategy.description,
            public,
            &assembled.tracks,
        ),
    )
    .await;

    match published {
        None => error!("Cancelled. The playlist may be incomplete."),
        Some(Ok(handle)) => success!(
            "Playlist {} created with {} tracks{}",
            handle.name,
            assembled.tracks.len(),
            handle
                .url
                .map(|url| format!(": {}", url))
                .unwrap_or_default()
        ),
        Some(Err(e)) => error!(
            "Failed to publish playlist (the recommendations above are unaffected): {}",
            e
        ),
    }
}
