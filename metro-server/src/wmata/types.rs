//! Feed API response DTOs and their conversion to domain types.
//!
//! These types map directly to the WMATA JSON API responses. Fields use
//! `Option` liberally because the feed omits or blanks fields rather than
//! promising them.

use serde::Deserialize;

use crate::domain::{ArrivalRecord, FeedLine, Line};
use crate::incidents::Incident;

use super::error::FeedError;

/// Response from `StationPrediction.svc/json/GetPrediction/{code}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PredictionResponse {
    pub trains: Vec<TrainPrediction>,
}

/// One predicted arrival, as the feed reports it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrainPrediction {
    /// Two-letter line code, or a sentinel ("--", "", "No", "Train").
    pub line: Option<String>,

    /// Destination display name. May be a sentinel rather than a station.
    pub destination_name: Option<String>,

    /// Minutes to arrival: numeric string, "BRD", "ARR", or blank.
    pub min: Option<String>,

    /// Number of cars (unused, kept for fidelity to the payload).
    pub car: Option<String>,

    /// Platform code the prediction is for.
    pub location_code: Option<String>,
}

/// Convert feed predictions to domain arrival records.
///
/// A line code outside the known alphabet fails the whole response: the
/// feed is speaking a dialect we do not understand and guessing would
/// mislabel trains.
pub fn convert_predictions(response: PredictionResponse) -> Result<Vec<ArrivalRecord>, FeedError> {
    response
        .trains
        .into_iter()
        .map(|train| {
            let code = train.line.unwrap_or_default();
            let line = FeedLine::parse(&code).ok_or_else(|| FeedError::UnknownLine(code))?;
            Ok(ArrivalRecord {
                line,
                terminus: train.destination_name.unwrap_or_default(),
                minutes: train.min,
            })
        })
        .collect()
}

/// Response from `Incidents.svc/json/Incidents`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IncidentsResponse {
    pub incidents: Vec<IncidentDto>,
}

/// One incident report.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IncidentDto {
    /// Free-text description shown to riders.
    pub description: Option<String>,

    /// Category, e.g. "Delay" or "Alert".
    pub incident_type: Option<String>,

    /// Semicolon-separated line codes, with stray blanks ("RD;").
    pub lines_affected: Option<String>,

    /// Last update, "%Y-%m-%dT%H:%M:%S" local time.
    pub date_updated: Option<String>,
}

/// Convert incident DTOs, dropping nothing: unknown affected-line codes are
/// skipped (an incident is still worth reporting), unparseable dates become
/// `None`.
pub fn convert_incidents(response: IncidentsResponse) -> Vec<Incident> {
    response
        .incidents
        .into_iter()
        .map(|dto| Incident {
            description: dto.description.unwrap_or_default(),
            kind: dto.incident_type.unwrap_or_default(),
            lines: parse_lines_affected(dto.lines_affected.as_deref().unwrap_or_default()),
            updated: dto
                .date_updated
                .and_then(|s| chrono::NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S").ok()),
        })
        .collect()
}

/// Parse the `LinesAffected` field: a `;`-separated list of feed line
/// codes with stray blanks.
fn parse_lines_affected(raw: &str) -> Vec<Line> {
    raw.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(Line::from_feed_code)
        .collect()
}

/// Response from `Rail.svc/json/jSrcStationToDstStationInfo`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EstimateResponse {
    pub station_to_station_infos: Vec<StationToStationInfo>,
}

/// One station-to-station row; only the rail time matters here.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StationToStationInfo {
    pub rail_time: u32,
}
