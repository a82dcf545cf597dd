//! Caching layer for live predictions.
//!
//! Boards are reloaded often and neighbouring boards share stops, so live
//! predictions are cached per (stop, mode) for a short time. Timetables are
//! fetched at most once per reload and pass straight through.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::board::TransitApi;
use crate::domain::{Mode, PredictedArrival};
use crate::tfl::TflError;
use crate::timetable::{Direction, TimetableResponse};

/// Cache key for predictions: (stop identifier, mode).
type PredictionKey = (String, Mode);

/// Cached predictions for one stop.
type PredictionEntry = Arc<Vec<PredictedArrival>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30),
            max_capacity: 500,
        }
    }
}

/// Upstream source with cached predictions.
///
/// Failed fetches are not cached.
pub struct CachedTransitApi<A> {
    inner: A,
    predictions: MokaCache<PredictionKey, PredictionEntry>,
}

impl<A: TransitApi> CachedTransitApi<A> {
    /// Wrap `inner` with a cache built from `config`.
    pub fn new(inner: A, config: &CacheConfig) -> Self {
        let predictions = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, predictions }
    }

    /// Access the underlying source for operations that bypass cache.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.predictions.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.predictions.invalidate_all();
    }
}

impl<A: TransitApi> TransitApi for CachedTransitApi<A> {
    async fn live_predictions(
        &self,
        naptan: &str,
        mode: Mode,
    ) -> Result<Vec<PredictedArrival>, TflError> {
        let key = (naptan.to_string(), mode);

        if let Some(cached) = self.predictions.get(&key).await {
            return Ok(cached.as_ref().clone());
        }

        let fetched = self.inner.live_predictions(naptan, mode).await?;
        let entry = Arc::new(fetched);
        self.predictions.insert(key, entry.clone()).await;

        Ok(entry.as_ref().clone())
    }

    async fn schedule(
        &self,
        line_id: &str,
        naptan: &str,
        direction: Direction,
    ) -> Result<Option<TimetableResponse>, TflError> {
        self.inner.schedule(line_id, naptan, direction).await
    }
}
