//! Caching layer for feed responses.
//!
//! Arrival predictions are deliberately never cached: they are
//! per-request, time-sensitive data and staleness shows immediately.
//! Incident reports and travel estimates move slowly, so they sit in small
//! TTL caches in front of whatever feed this wraps.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{ArrivalRecord, StationCode};
use crate::incidents::Incident;

use super::ArrivalFeed;
use super::error::FeedError;

/// Configuration for the feed cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for the incident list.
    pub incidents_ttl: Duration,

    /// TTL for travel estimates.
    pub estimates_ttl: Duration,

    /// Maximum number of cached estimate pairs.
    pub estimates_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            incidents_ttl: Duration::from_secs(60),
            estimates_ttl: Duration::from_secs(60 * 60),
            estimates_capacity: 1000,
        }
    }
}

/// A feed wrapper that caches slow-moving responses.
pub struct CachedFeed<F> {
    inner: F,

    /// The incident list, a single entry keyed by unit.
    incidents: MokaCache<(), Arc<Vec<Incident>>>,

    /// Travel estimates keyed by (from, to).
    estimates: MokaCache<(StationCode, StationCode), u32>,
}

impl<F: ArrivalFeed> CachedFeed<F> {
    /// Wrap `inner` with caches sized by `config`.
    pub fn new(inner: F, config: &CacheConfig) -> Self {
        let incidents = MokaCache::builder()
            .time_to_live(config.incidents_ttl)
            .max_capacity(1)
            .build();

        let estimates = MokaCache::builder()
            .time_to_live(config.estimates_ttl)
            .max_capacity(config.estimates_capacity)
            .build();

        Self {
            inner,
            incidents,
            estimates,
        }
    }

    /// Access the wrapped feed.
    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Drop everything cached.
    pub fn invalidate_all(&self) {
        self.incidents.invalidate_all();
        self.estimates.invalidate_all();
    }
}

impl<F: ArrivalFeed> ArrivalFeed for CachedFeed<F> {
    /// Pass-through: predictions are never cached.
    async fn predictions(&self, code: &StationCode) -> Result<Vec<ArrivalRecord>, FeedError> {
        self.inner.predictions(code).await
    }

    async fn incidents(&self) -> Result<Vec<Incident>, FeedError> {
        if let Some(cached) = self.incidents.get(&()).await {
            debug!("incident cache hit");
            return Ok(cached.as_ref().clone());
        }

        let fresh = self.inner.incidents().await?;
        self.incidents.insert((), Arc::new(fresh.clone())).await;
        Ok(fresh)
    }

    async fn travel_estimate(
        &self,
        from: &StationCode,
        to: &StationCode,
    ) -> Result<u32, FeedError> {
        let key = (*from, *to);
        if let Some(cached) = self.estimates.get(&key).await {
            debug!(from = %from, to = %to, "estimate cache hit");
            return Ok(cached);
        }

        let fresh = self.inner.travel_estimate(from, to).await?;
        self.estimates.insert(key, fresh).await;
        Ok(fresh)
    }
}
