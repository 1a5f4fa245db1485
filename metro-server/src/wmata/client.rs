//! WMATA HTTP client.
//!
//! Async client for the three feed endpoints the engine consumes: rail
//! predictions, incident reports, and station-to-station travel times.
//! Every request is bounded by the client-wide timeout; transport and
//! decoding failures surface as [`FeedError`] values, never panics.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;

use crate::domain::{ArrivalRecord, StationCode};
use crate::incidents::Incident;

use super::error::FeedError;
use super::types::{
    EstimateResponse, IncidentsResponse, PredictionResponse, convert_incidents,
    convert_predictions,
};
use super::ArrivalFeed;

/// Default base URL for the WMATA API.
const DEFAULT_BASE_URL: &str = "https://api.wmata.com";

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct WmataConfig {
    /// API key sent in the `api_key` header
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl WmataConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the WMATA API.
#[derive(Debug, Clone)]
pub struct WmataClient {
    http: reqwest::Client,
    base_url: String,
}

impl WmataClient {
    /// Create a new feed client.
    pub fn new(config: WmataConfig) -> Result<Self, FeedError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| FeedError::Api {
            status: 0,
            message: "Invalid API key format".to_string(),
        })?;
        headers.insert(HeaderName::from_static("api_key"), api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// GET a JSON endpoint with shared status triage.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FeedError> {
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FeedError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| FeedError::Json {
            message: e.to_string(),
        })
    }
}

impl ArrivalFeed for WmataClient {
    /// Upcoming arrivals for one platform code.
    async fn predictions(&self, code: &StationCode) -> Result<Vec<ArrivalRecord>, FeedError> {
        let url = format!(
            "{}/StationPrediction.svc/json/GetPrediction/{}",
            self.base_url,
            code.as_str()
        );
        let response: PredictionResponse = self.get_json(&url, &[]).await?;
        convert_predictions(response)
    }

    /// All current incident reports.
    async fn incidents(&self) -> Result<Vec<Incident>, FeedError> {
        let url = format!("{}/Incidents.svc/json/Incidents", self.base_url);
        let response: IncidentsResponse = self.get_json(&url, &[]).await?;
        Ok(convert_incidents(response))
    }

    /// Scheduled travel time in minutes between two platform codes.
    async fn travel_estimate(
        &self,
        from: &StationCode,
        to: &StationCode,
    ) -> Result<u32, FeedError> {
        let url = format!("{}/Rail.svc/json/jSrcStationToDstStationInfo", self.base_url);
        let response: EstimateResponse = self
            .get_json(
                &url,
                &[
                    ("FromStationCode", from.as_str()),
                    ("ToStationCode", to.as_str()),
                ],
            )
            .await?;

        response
            .station_to_station_infos
            .first()
            .map(|info| info.rail_time)
            .ok_or_else(|| FeedError::Json {
                message: "no station-to-station info in response".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = WmataConfig::new("test-api-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn config_builder() {
        let config = WmataConfig::new("test-api-key")
            .with_base_url("http://localhost:8080")
            .with_timeout(3);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn client_creation() {
        let client = WmataClient::new(WmataConfig::new("test-api-key"));
        assert!(client.is_ok());
    }

    // Integration tests would require a real API key and live HTTP; the
    // engine is exercised against the in-memory mock feed instead.
}
