use std::error::Error;

use weatherbeats::{
    cli::{RecommendOptions, failure_message},
    recommend::RecommendationError,
};

fn message(err: impl Error + Send + Sync + 'static) -> String {
    let boxed: Box<dyn Error + Send + Sync> = Box::new(err);
    failure_message(boxed.as_ref())
}

#[test]
fn test_nothing_found_suggests_retrying_later() {
    let text = message(RecommendationError::NoTracksFound);
    assert!(text.contains("try again later"));
}

#[test]
fn test_filtered_out_suggests_allowing_explicit() {
    let text = message(RecommendationError::NoTracksAfterFiltering { found: 12 });
    assert!(text.contains("12"));
    assert!(text.contains("--allow-explicit"));
}

#[test]
fn test_outcomes_have_distinct_messages() {
    let none = message(RecommendationError::NoTracksFound);
    let filtered = message(RecommendationError::NoTracksAfterFiltering { found: 1 });
    let cancelled = message(RecommendationError::Cancelled);

    assert_ne!(none, filtered);
    assert_ne!(none, cancelled);
    assert_ne!(filtered, cancelled);
}

#[test]
fn test_other_errors_keep_their_text() {
    let err: Box<dyn Error + Send + Sync> = "Provide either --condition or both --lat and --lon".into();
    assert_eq!(
        failure_message(err.as_ref()),
        "Provide either --condition or both --lat and --lon"
    );
}

#[test]
fn test_explicit_flags_override_the_configured_default() {
    let allow = RecommendOptions {
        allow_explicit: Some(true),
        ..Default::default()
    };
    let deny = RecommendOptions {
        allow_explicit: Some(false),
        ..Default::default()
    };

    assert!(allow.allow_explicit_or(false));
    assert!(!deny.allow_explicit_or(true));
}

#[test]
fn test_configured_default_applies_without_a_flag() {
    let unset = RecommendOptions::default();

    assert!(unset.allow_explicit_or(true));
    assert!(!unset.allow_explicit_or(false));
}
