use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric, seq::SliceRandom};
use sha2::{Digest, Sha256};

use crate::types::Track;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Keeps the first occurrence of every track.
///
/// A track is a duplicate when its id was already seen or when its lowercase
/// (first artist, title) pair was already seen.
pub fn remove_duplicate_tracks(tracks: &mut Vec<Track>) {
    let mut seen_ids = HashSet::new();
    let mut seen_recordings = HashSet::new();
    tracks.retain(|track| {
        let recording = track.recording_key();
        if seen_ids.contains(&track.id) || seen_recordings.contains(&recording) {
            return false;
        }
        seen_ids.insert(track.id.clone());
        seen_recordings.insert(recording);
        true
    });
}

pub fn remove_explicit_tracks(tracks: &mut Vec<Track>) {
    tracks.retain(|track| !track.explicit);
}

/// Uniform random permutation (Fisher-Yates) using the supplied random source.
pub fn shuffle_tracks<R: Rng + ?Sized>(tracks: &mut [Track], rng: &mut R) {
    tracks.shuffle(rng);
}
