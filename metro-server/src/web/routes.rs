//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::engine::{TimesReply, TimesRequest};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/times", get(times))
        .route("/estimate", get(estimate))
        .route("/incidents", get(incidents))
        .route("/home", get(get_home).post(set_home))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Upcoming arrivals for a spoken trip.
async fn times(
    State(state): State<AppState>,
    Query(query): Query<TimesQuery>,
) -> Result<Response, ApiError> {
    let request = TimesRequest {
        origin: query.origin,
        destination: query.destination,
        line: query.line,
        user_id: query.user,
    };

    match state.engine.times(&request).await? {
        TimesReply::Arrivals {
            arrivals,
            itinerary,
        } => Ok(Json(TimesResponse::from_reply(&arrivals, &itinerary)).into_response()),
        TimesReply::EasterEgg(egg) => Ok(Json(EasterEggResponse {
            easter_egg: egg.to_string(),
        })
        .into_response()),
    }
}

/// Scheduled travel time between two spoken stations.
async fn estimate(
    State(state): State<AppState>,
    Query(query): Query<EstimateQuery>,
) -> Result<Json<EstimateView>, ApiError> {
    let reply = state
        .engine
        .estimate(query.origin.as_deref(), &query.destination, &query.user)
        .await?;

    let destination = reply
        .itinerary
        .dst
        .as_ref()
        .map(StationView::from_station)
        .unwrap_or_else(|| StationView::from_station(&reply.itinerary.src));

    Ok(Json(EstimateView {
        minutes: reply.minutes,
        origin: StationView::from_station(&reply.itinerary.src),
        destination,
    }))
}

/// Current incidents, optionally narrowed by line and category.
async fn incidents(
    State(state): State<AppState>,
    Query(query): Query<IncidentsQuery>,
) -> Result<Response, ApiError> {
    let incidents = state
        .engine
        .incidents(query.line.as_deref(), query.kind.as_deref())
        .await?;
    Ok(Json(incidents).into_response())
}

/// The rider's stored home station.
async fn get_home(
    State(state): State<AppState>,
    Query(query): Query<HomeQuery>,
) -> Result<Json<HomeResponse>, ApiError> {
    let home = state.engine.home(&query.user).await?;
    Ok(Json(HomeResponse {
        user: query.user,
        home,
    }))
}

/// Set the rider's home station from spoken text.
async fn set_home(
    State(state): State<AppState>,
    Json(request): Json<SetHomeRequest>,
) -> Result<Json<HomeResponse>, ApiError> {
    let station = state.engine.set_home(&request.user, &request.station).await?;
    Ok(Json(HomeResponse {
        user: request.user,
        home: Some(station.name().to_string()),
    }))
}
