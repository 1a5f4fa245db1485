//! Live transit feed collaborator.
//!
//! The engine consumes the feed through the [`ArrivalFeed`] trait so it can
//! be served by the real HTTP client, the caching wrapper, or the in-memory
//! mock interchangeably. Responses are converted to domain types at this
//! boundary; nothing upstream sees raw feed JSON.

mod cache;
mod client;
mod error;
mod mock;
mod types;

pub use cache::{CacheConfig, CachedFeed};
pub use client::{WmataClient, WmataConfig};
pub use error::FeedError;
pub use mock::MockFeed;
pub use types::{
    EstimateResponse, IncidentDto, IncidentsResponse, PredictionResponse, TrainPrediction,
    convert_incidents, convert_predictions,
};

use crate::domain::{ArrivalRecord, StationCode};
use crate::incidents::Incident;

/// The live feed as the engine sees it.
///
/// Implementations must bound their own latency (the HTTP client carries a
/// request timeout); the engine converts any failure into its own error
/// taxonomy and never retries.
pub trait ArrivalFeed: Send + Sync {
    /// Upcoming arrivals for one platform code, in feed order.
    fn predictions(
        &self,
        code: &StationCode,
    ) -> impl Future<Output = Result<Vec<ArrivalRecord>, FeedError>> + Send;

    /// All current incident reports.
    fn incidents(&self) -> impl Future<Output = Result<Vec<Incident>, FeedError>> + Send;

    /// Scheduled travel time in minutes between two platform codes.
    fn travel_estimate(
        &self,
        from: &StationCode,
        to: &StationCode,
    ) -> impl Future<Output = Result<u32, FeedError>> + Send;
}
