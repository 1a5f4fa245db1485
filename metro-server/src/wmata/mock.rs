//! Mock feed for testing without API access.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::RwLock;

use crate::domain::{ArrivalRecord, StationCode};
use crate::incidents::Incident;

use super::ArrivalFeed;
use super::error::FeedError;

/// How a mock call should fail, when failure is scripted.
#[derive(Debug, Clone)]
enum ScriptedFailure {
    Offline,
    UnknownLine(String),
}

/// In-memory [`ArrivalFeed`] with per-method call counters.
///
/// Serves canned boards, incidents, and estimates; can be switched into a
/// failure mode to exercise the engine's error mapping.
#[derive(Clone, Default)]
pub struct MockFeed {
    boards: Arc<RwLock<HashMap<StationCode, Vec<ArrivalRecord>>>>,
    incidents: Arc<RwLock<Vec<Incident>>>,
    estimates: Arc<RwLock<HashMap<(StationCode, StationCode), u32>>>,
    failure: Arc<RwLock<Option<ScriptedFailure>>>,
    prediction_calls: Arc<AtomicUsize>,
    incident_calls: Arc<AtomicUsize>,
    estimate_calls: Arc<AtomicUsize>,
}

impl MockFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `records` for `code`.
    pub async fn set_board(&self, code: StationCode, records: Vec<ArrivalRecord>) {
        self.boards.write().await.insert(code, records);
    }

    /// Serve `incidents` from the incidents endpoint.
    pub async fn set_incidents(&self, incidents: Vec<Incident>) {
        *self.incidents.write().await = incidents;
    }

    /// Serve `minutes` for the `from` -> `to` estimate.
    pub async fn set_estimate(&self, from: StationCode, to: StationCode, minutes: u32) {
        self.estimates.write().await.insert((from, to), minutes);
    }

    /// Make every call fail as if the feed were unreachable.
    pub async fn go_offline(&self) {
        *self.failure.write().await = Some(ScriptedFailure::Offline);
    }

    /// Make every call fail as if the feed emitted an unknown line code.
    pub async fn speak_unknown_line(&self, code: impl Into<String>) {
        *self.failure.write().await = Some(ScriptedFailure::UnknownLine(code.into()));
    }

    /// Clear any scripted failure.
    pub async fn restore(&self) {
        *self.failure.write().await = None;
    }

    /// Number of prediction fetches performed.
    pub fn prediction_calls(&self) -> usize {
        self.prediction_calls.load(Ordering::SeqCst)
    }

    /// Number of incident fetches performed.
    pub fn incident_calls(&self) -> usize {
        self.incident_calls.load(Ordering::SeqCst)
    }

    /// Number of estimate fetches performed.
    pub fn estimate_calls(&self) -> usize {
        self.estimate_calls.load(Ordering::SeqCst)
    }

    async fn scripted_failure(&self) -> Option<FeedError> {
        match &*self.failure.read().await {
            Some(ScriptedFailure::Offline) => Some(FeedError::Api {
                status: 503,
                message: "offline".to_string(),
            }),
            Some(ScriptedFailure::UnknownLine(code)) => {
                Some(FeedError::UnknownLine(code.clone()))
            }
            None => None,
        }
    }
}

impl ArrivalFeed for MockFeed {
    async fn predictions(&self, code: &StationCode) -> Result<Vec<ArrivalRecord>, FeedError> {
        self.prediction_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.scripted_failure().await {
            return Err(err);
        }

        let boards = self.boards.read().await;
        Ok(boards.get(code).cloned().unwrap_or_default())
    }

    async fn incidents(&self) -> Result<Vec<Incident>, FeedError> {
        self.incident_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.scripted_failure().await {
            return Err(err);
        }

        Ok(self.incidents.read().await.clone())
    }

    async fn travel_estimate(
        &self,
        from: &StationCode,
        to: &StationCode,
    ) -> Result<u32, FeedError> {
        self.estimate_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.scripted_failure().await {
            return Err(err);
        }

        let estimates = self.estimates.read().await;
        estimates
            .get(&(*from, *to))
            .copied()
            .ok_or_else(|| FeedError::Json {
                message: "no station-to-station info in response".to_string(),
            })
    }
}
