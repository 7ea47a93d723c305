//! # Recommendation Engine
//!
//! Turns a weather condition into a list of tracks:
//!
//! ```text
//! weather condition + settings
//!          ↓
//! strategy (search terms)  +  market (regional catalogs)
//!          ↓
//! query list  →  TrackSearch (repeated, sequential)
//!          ↓
//! Assembler: pool → dedup → explicit filter → shuffle → truncate
//! ```
//!
//! The strategy and market tables are compile-time constants. A pool lives only
//! for the duration of one [`Assembler::assemble`] call, so concurrent runs share
//! nothing mutable.

pub mod assembler;
pub mod errors;
pub mod market;
pub mod query;
pub mod strategy;

pub use assembler::{
    Assembler, MAX_MARKETS_PER_QUERY, RecommendationRequest, RecommendationResult, finalize,
};
pub use errors::RecommendationError;
pub use market::{DEFAULT_MARKET, resolve_markets};
pub use strategy::SearchStrategy;
