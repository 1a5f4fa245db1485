//! Data transfer objects for web requests and responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::domain::{ArrivalRecord, Station, TripError};
use crate::trip::Itinerary;

/// Query parameters for `GET /times`.
#[derive(Debug, Deserialize)]
pub struct TimesQuery {
    /// Spoken origin text; absent means "my home station".
    pub origin: Option<String>,

    /// Spoken destination text.
    pub destination: Option<String>,

    /// Spoken line constraint.
    pub line: Option<String>,

    /// Rider identifier.
    pub user: String,
}

/// Query parameters for `GET /estimate`.
#[derive(Debug, Deserialize)]
pub struct EstimateQuery {
    /// Spoken origin text; absent means "my home station".
    pub origin: Option<String>,

    /// Spoken destination text (required: an estimate needs both ends).
    pub destination: String,

    /// Rider identifier.
    pub user: String,
}

/// Query parameters for `GET /incidents`.
#[derive(Debug, Deserialize)]
pub struct IncidentsQuery {
    /// Spoken line name to narrow by.
    pub line: Option<String>,

    /// Spoken category ("delays", "alerts", "incidents").
    pub kind: Option<String>,
}

/// Query parameters for `GET /home`.
#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub user: String,
}

/// Body for `POST /home`.
#[derive(Debug, Deserialize)]
pub struct SetHomeRequest {
    pub user: String,

    /// Spoken station name; stored in canonical form.
    pub station: String,
}

/// A resolved station in a response.
#[derive(Debug, Serialize)]
pub struct StationView {
    pub name: String,
    pub lines: Vec<String>,
}

impl StationView {
    pub fn from_station(station: &Station) -> Self {
        Self {
            name: station.name().to_string(),
            lines: station.lines().map(|line| line.to_string()).collect(),
        }
    }
}

/// One surviving arrival in a response.
#[derive(Debug, Serialize)]
pub struct ArrivalView {
    /// Spoken form of the line ("red line", "ghost train", ...).
    pub line: String,

    /// Stated terminus, exactly as the feed reported it.
    pub terminus: String,

    /// Minutes to arrival, if the feed said.
    pub minutes: Option<String>,
}

impl ArrivalView {
    pub fn from_record(record: &ArrivalRecord) -> Self {
        Self {
            line: record.line.to_string(),
            terminus: record.terminus.clone(),
            minutes: record.minutes.clone(),
        }
    }
}

/// Response for `GET /times`.
#[derive(Debug, Serialize)]
pub struct TimesResponse {
    pub origin: StationView,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<StationView>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,

    pub arrivals: Vec<ArrivalView>,
}

impl TimesResponse {
    pub fn from_reply(arrivals: &[ArrivalRecord], itinerary: &Itinerary) -> Self {
        Self {
            origin: StationView::from_station(&itinerary.src),
            destination: itinerary.dst.as_ref().map(StationView::from_station),
            line: itinerary.line.as_ref().map(|choice| choice.to_string()),
            arrivals: arrivals.iter().map(ArrivalView::from_record).collect(),
        }
    }
}

/// Response for `GET /times` when the destination is a joke terminus. The
/// presentation layer supplies the punch line.
#[derive(Debug, Serialize)]
pub struct EasterEggResponse {
    pub easter_egg: String,
}

/// Response for `GET /estimate`.
#[derive(Debug, Serialize)]
pub struct EstimateView {
    pub minutes: u32,
    pub origin: StationView,
    pub destination: StationView,
}

/// Response for `GET /home` and `POST /home`.
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub user: String,
    pub home: Option<String>,
}

/// Error envelope: a stable machine tag plus the engine's wording and the
/// names the caller may want when re-phrasing.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// Web-layer error wrapper mapping the engine taxonomy to HTTP statuses.
#[derive(Debug)]
pub struct ApiError(pub TripError);

impl From<TripError> for ApiError {
    fn from(err: TripError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            TripError::NoHome | TripError::NoOrigin => StatusCode::BAD_REQUEST,
            TripError::InvalidStation(_)
            | TripError::InvalidDestination(_)
            | TripError::UnknownLine(_) => StatusCode::NOT_FOUND,
            TripError::SrcLine { .. }
            | TripError::DstLine { .. }
            | TripError::StationIntersection { .. }
            | TripError::SameStation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            TripError::Connection | TripError::Persistence => StatusCode::BAD_GATEWAY,
        }
    }

    fn tag(&self) -> &'static str {
        match self.0 {
            TripError::InvalidStation(_) => "invalid_station",
            TripError::InvalidDestination(_) => "invalid_destination",
            TripError::NoHome => "no_home",
            TripError::NoOrigin => "no_origin",
            TripError::SrcLine { .. } => "invalid_source_line",
            TripError::DstLine { .. } => "invalid_destination_line",
            TripError::StationIntersection { .. } => "no_intersection",
            TripError::SameStation(_) => "same_stations",
            TripError::UnknownLine(_) => "unknown_line",
            TripError::Connection => "connection_problem",
            TripError::Persistence => "persistence_problem",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.tag(),
            message: self.0.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeedLine, Line};

    #[test]
    fn arrival_view_uses_spoken_line_names() {
        let record = ArrivalRecord {
            line: FeedLine::Revenue(Line::Orange),
            terminus: "New Carrollton".to_string(),
            minutes: Some("7".to_string()),
        };
        let view = ArrivalView::from_record(&record);
        assert_eq!(view.line, "orange line");
        assert_eq!(view.terminus, "New Carrollton");

        let ghost = ArrivalRecord {
            line: FeedLine::Ghost,
            terminus: "Train".to_string(),
            minutes: Some("2".to_string()),
        };
        assert_eq!(ArrivalView::from_record(&ghost).line, "ghost train");
    }

    #[test]
    fn error_statuses() {
        assert_eq!(
            ApiError(TripError::NoHome).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(TripError::InvalidStation("x".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError(TripError::SameStation("x".into())).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError(TripError::Connection).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn error_tags_are_stable() {
        assert_eq!(
            ApiError(TripError::StationIntersection {
                src: "a".into(),
                dst: "b".into()
            })
            .tag(),
            "no_intersection"
        );
        assert_eq!(ApiError(TripError::UnknownLine("ZZ".into())).tag(), "unknown_line");
    }
}
