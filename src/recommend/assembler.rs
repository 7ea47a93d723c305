//! Tiered, best-effort assembly of a weather-flavoured track list.
//!
//! One run walks three tiers of searches, stopping as soon as the pool holds
//! enough tracks:
//!
//! 1. **Main tier**: the strategy's query list, each query tried in up to
//!    [`MAX_MARKETS_PER_QUERY`] markets until one market returns something.
//! 2. **Fallback tier**: only when the pool is below the desired count,
//!    single-word emergency queries in the primary market.
//! 3. **Last resort**: only when the pool is still empty, one generic search
//!    in the default market.
//!
//! The pool is then deduplicated, optionally stripped of explicit tracks,
//! shuffled and truncated. Provider calls run strictly one after another with
//! a fixed pause in between.

use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use super::{
    RecommendationError,
    market::{self, DEFAULT_MARKET},
    query::{self, EMERGENCY_TERMS, LAST_RESORT_TERM},
    strategy,
};
use crate::{
    config,
    spotify::search::{MAX_SEARCH_LIMIT, TrackSearch},
    types::Track,
    utils,
};

/// Markets tried per query before moving on to the next query.
pub const MAX_MARKETS_PER_QUERY: usize = 3;

/// One user request for recommendations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRequest {
    pub weather_condition: String,
    pub desired_count: usize,
    pub allow_explicit: bool,
}

impl RecommendationRequest {
    pub fn new(
        weather_condition: impl Into<String>,
        desired_count: usize,
        allow_explicit: bool,
    ) -> Result<Self, RecommendationError> {
        if desired_count == 0 {
            return Err(RecommendationError::InvalidRequest(
                "desired track count must be greater than zero".into(),
            ));
        }

        Ok(Self {
            weather_condition: weather_condition.into(),
            desired_count,
            allow_explicit,
        })
    }

    /// Over-provisioned pool target: 1.3x the desired count when explicit
    /// tracks are allowed, 2.5x when they will be filtered out. Rounded up.
    /// Saturates for huge counts and never drops below the desired count.
    pub fn target_with_buffer(&self) -> usize {
        let factor = if self.allow_explicit { 13 } else { 25 };
        self.desired_count
            .saturating_mul(factor)
            .div_ceil(10)
            .max(self.desired_count)
    }
}

/// Ordered tracks, at most `desired_count` long.
pub type RecommendationResult = Vec<Track>;

/// Drives a [`TrackSearch`] until a request can be answered.
pub struct Assembler<S> {
    search: S,
    locale_hint: Option<String>,
    call_delay: Duration,
    cancellation: Option<CancellationToken>,
}

/// Mutable state of a single run. Owned by that run only.
struct Run {
    pool: Vec<Track>,
    calls: usize,
}

impl<S: TrackSearch> Assembler<S> {
    pub fn new(search: S) -> Self {
        Self {
            search,
            locale_hint: None,
            call_delay: Duration::from_millis(config::DEFAULT_CALL_DELAY_MS),
            cancellation: None,
        }
    }

    /// Locale used to pick markets, e.g. `fr-FR`.
    pub fn with_locale(mut self, locale_hint: Option<String>) -> Self {
        self.locale_hint = locale_hint;
        self
    }

    pub fn with_call_delay(mut self, call_delay: Duration) -> Self {
        self.call_delay = call_delay;
        self
    }

    /// Abandons the run at the next provider call or pause once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Assembles recommendations using the thread-local random source for the
    /// final shuffle.
    pub async fn assemble(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResult, RecommendationError> {
        let pool = self.collect_pool(request).await?;
        finalize(pool, request, &mut rand::rng())
    }

    /// Same as [`Assembler::assemble`] with an injected random source.
    pub async fn assemble_with_rng<R: Rng + Send + ?Sized>(
        &self,
        request: &RecommendationRequest,
        rng: &mut R,
    ) -> Result<RecommendationResult, RecommendationError> {
        let pool = self.collect_pool(request).await?;
        finalize(pool, request, rng)
    }

    /// Runs every search tier and returns the raw pool, before deduplication
    /// and filtering.
    ///
    /// # Errors
    ///
    /// [`RecommendationError::NoTracksFound`] when every tier came back empty,
    /// [`RecommendationError::Cancelled`] when the cancellation token fired.
    pub async fn collect_pool(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Track>, RecommendationError> {
        let target = request.target_with_buffer();
        let markets = market::resolve_markets(self.locale_hint.as_deref());
        let strategy = strategy::for_condition(&request.weather_condition);
        let queries = query::build_queries(strategy);

        tracing::info!(
            condition = %request.weather_condition,
            strategy = strategy.condition,
            target,
            markets = ?&markets[..markets.len().min(MAX_MARKETS_PER_QUERY)],
            "assembling recommendations"
        );

        let mut run = Run {
            pool: Vec::new(),
            calls: 0,
        };

        for query in &queries {
            if run.pool.len() >= target {
                break;
            }
            for market in markets.iter().take(MAX_MARKETS_PER_QUERY) {
                if self.search_into(&mut run, query, market).await? > 0 {
                    break;
                }
            }
        }

        if run.pool.len() < request.desired_count {
            tracing::info!(pool = run.pool.len(), "main tier short, trying emergency queries");
            let primary = &markets[0];
            for term in EMERGENCY_TERMS {
                if run.pool.len() >= target {
                    break;
                }
                self.search_into(&mut run, term, primary).await?;
            }
        }

        if run.pool.is_empty() {
            tracing::info!("pool still empty, running last-resort search");
            self.search_into(&mut run, LAST_RESORT_TERM, DEFAULT_MARKET)
                .await?;
        }

        if run.pool.is_empty() {
            return Err(RecommendationError::NoTracksFound);
        }

        tracing::info!(pool = run.pool.len(), calls = run.calls, "search tiers finished");
        Ok(run.pool)
    }

    /// Issues one provider call, pausing first if it is not the run's first
    /// call. Returns the number of tracks added to the pool.
    async fn search_into(
        &self,
        run: &mut Run,
        query: &str,
        market: &str,
    ) -> Result<usize, RecommendationError> {
        if run.calls > 0 {
            self.pause().await?;
        }
        self.ensure_not_cancelled()?;

        run.calls += 1;
        let found = self.search.search(query, MAX_SEARCH_LIMIT, market).await;
        let count = found.len();
        run.pool.extend(found);

        tracing::debug!(query, market, count, pool = run.pool.len(), "search call");
        Ok(count)
    }

    async fn pause(&self) -> Result<(), RecommendationError> {
        if self.call_delay.is_zero() {
            return Ok(());
        }

        match &self.cancellation {
            Some(token) => tokio::select! {
                _ = token.cancelled() => Err(RecommendationError::Cancelled),
                _ = sleep(self.call_delay) => Ok(()),
            },
            None => {
                sleep(self.call_delay).await;
                Ok(())
            }
        }
    }

    fn ensure_not_cancelled(&self) -> Result<(), RecommendationError> {
        match &self.cancellation {
            Some(token) if token.is_cancelled() => Err(RecommendationError::Cancelled),
            _ => Ok(()),
        }
    }
}

/// Deduplicates, filters, shuffles and truncates a raw pool.
///
/// A result shorter than `desired_count` is a success.
///
/// # Errors
///
/// [`RecommendationError::NoTracksFound`] for an empty pool and
/// [`RecommendationError::NoTracksAfterFiltering`] when the explicit-content
/// filter removes every track.
pub fn finalize<R: Rng + ?Sized>(
    mut pool: Vec<Track>,
    request: &RecommendationRequest,
    rng: &mut R,
) -> Result<RecommendationResult, RecommendationError> {
    if pool.is_empty() {
        return Err(RecommendationError::NoTracksFound);
    }

    utils::remove_duplicate_tracks(&mut pool);
    let found = pool.len();

    if !request.allow_explicit {
        utils::remove_explicit_tracks(&mut pool);
        if pool.is_empty() {
            return Err(RecommendationError::NoTracksAfterFiltering { found });
        }
    }

    utils::shuffle_tracks(&mut pool, rng);
    pool.truncate(request.desired_count);
    Ok(pool)
}
