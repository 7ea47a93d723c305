//! Typed errors for recommendation assembly.

use thiserror::Error;

/// Fatal outcomes of one assembly run.
///
/// A shorter-than-requested result is not represented here; it is a success.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecommendationError {
    /// The request itself is unusable (e.g. a desired count of zero).
    #[error("Invalid recommendation request: {0}")]
    InvalidRequest(String),

    /// Every search tier came back empty.
    #[error("Unable to generate recommendations: no tracks found")]
    NoTracksFound,

    /// Tracks were found but all of them were removed by the explicit-content filter.
    #[error("Found {found} tracks but none passed the explicit-content filter")]
    NoTracksAfterFiltering { found: usize },

    /// The caller abandoned the run.
    #[error("Recommendation run was cancelled")]
    Cancelled,
}
