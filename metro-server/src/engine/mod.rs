//! The request surface.
//!
//! One engine instance owns the resolver, the feed, and the home store, and
//! answers the questions the outer API exposes: "when is my train", "how
//! long is the ride", "what is broken", and home-station upkeep. Each call
//! is an independent, short-lived unit of work; all failures come back as
//! [`TripError`] values.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{ArrivalRecord, Line, LineChoice, Station, TripError};
use crate::home::HomeStore;
use crate::incidents::{Incident, filter_incidents};
use crate::resolve::{EasterEgg, NameResolver, Resolved, Role};
use crate::stations::StationDirectory;
use crate::trip::{Itinerary, filter_arrivals};
use crate::wmata::ArrivalFeed;

/// A spoken "when is my train" request.
#[derive(Debug, Clone, Default)]
pub struct TimesRequest {
    /// Spoken origin text; absent means "use my home station".
    pub origin: Option<String>,
    /// Spoken destination text; absent means any direction is fine.
    pub destination: Option<String>,
    /// Spoken line constraint.
    pub line: Option<String>,
    /// Rider identifier for home-station lookup.
    pub user_id: String,
}

/// A successful "when is my train" answer.
#[derive(Debug, Clone, PartialEq)]
pub enum TimesReply {
    /// The filtered arrivals plus the validated trip they were filtered
    /// against (whose endpoints are the resolved stations).
    Arrivals {
        arrivals: Vec<ArrivalRecord>,
        itinerary: Itinerary,
    },
    /// The rider asked for a joke terminus; the presentation layer answers
    /// this itself, no feed involved.
    EasterEgg(EasterEgg),
}

/// A successful travel-time answer.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateReply {
    pub minutes: u32,
    pub itinerary: Itinerary,
}

/// Orchestrates resolve -> validate -> fetch -> filter.
pub struct Engine<F, H> {
    directory: Arc<StationDirectory>,
    resolver: NameResolver,
    feed: F,
    home: H,
}

impl<F: ArrivalFeed, H: HomeStore> Engine<F, H> {
    pub fn new(directory: Arc<StationDirectory>, feed: F, home: H) -> Self {
        let resolver = NameResolver::new(directory.clone());
        Self {
            directory,
            resolver,
            feed,
            home,
        }
    }

    /// The station directory this engine answers from.
    pub fn directory(&self) -> &StationDirectory {
        &self.directory
    }

    /// Answer "when is my train".
    pub async fn times(&self, request: &TimesRequest) -> Result<TimesReply, TripError> {
        let line = request
            .line
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(LineChoice::parse);

        let src = self
            .resolve_station(request.origin.as_deref(), Role::Origin, &request.user_id)
            .await?;

        let destination_text = request
            .destination
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty());

        let dst = match destination_text {
            None => None,
            Some(text) => {
                match self
                    .resolver
                    .resolve(Some(text), Role::Destination, &request.user_id, &self.home)
                    .await?
                {
                    Resolved::EasterEgg(egg) => return Ok(TimesReply::EasterEgg(egg)),
                    Resolved::Station(station) => Some(station),
                }
            }
        };

        let itinerary = Itinerary::build(src, dst, line, &self.directory)?;

        let platform = itinerary.boarding_platform();
        let raw = self.feed.predictions(&platform.code).await?;
        let arrivals = filter_arrivals(&raw, &itinerary, &self.directory);

        debug!(
            origin = %itinerary.src,
            platform = %platform.code,
            fetched = raw.len(),
            kept = arrivals.len(),
            "filtered arrivals"
        );

        Ok(TimesReply::Arrivals {
            arrivals,
            itinerary,
        })
    }

    /// Answer "how long from A to B".
    ///
    /// Reuses the full trip validation (Farragut, shared line, distinct
    /// endpoints) and then asks the feed for the scheduled ride time
    /// between the endpoints' platforms on the shared line.
    pub async fn estimate(
        &self,
        origin: Option<&str>,
        destination: &str,
        user_id: &str,
    ) -> Result<EstimateReply, TripError> {
        let src = self.resolve_station(origin, Role::Origin, user_id).await?;

        let dst = match self
            .resolver
            .resolve(Some(destination), Role::Destination, user_id, &self.home)
            .await?
        {
            // No train rides to the joke termini, so there is no estimate.
            Resolved::EasterEgg(egg) => {
                return Err(TripError::InvalidDestination(egg.to_string()));
            }
            Resolved::Station(station) => station,
        };

        let itinerary = Itinerary::build(src, Some(dst), None, &self.directory)?;
        let Some(geometry) = itinerary.geometry.as_ref() else {
            unreachable!("geometry is derived whenever a destination is present");
        };

        let from = itinerary
            .src
            .platform(geometry.shared_line)
            .expect("shared line serves the origin")
            .code;
        let to = itinerary
            .dst
            .as_ref()
            .and_then(|dst| dst.platform(geometry.shared_line))
            .expect("shared line serves the destination")
            .code;

        let minutes = self.feed.travel_estimate(&from, &to).await?;

        Ok(EstimateReply { minutes, itinerary })
    }

    /// Current incidents, optionally narrowed to a spoken line and category.
    pub async fn incidents(
        &self,
        line: Option<&str>,
        kind: Option<&str>,
    ) -> Result<Vec<Incident>, TripError> {
        let line = match line.map(str::trim).filter(|text| !text.is_empty()) {
            None => None,
            Some(text) => Some(
                Line::parse_spoken(text)
                    .ok_or_else(|| TripError::UnknownLine(text.to_string()))?,
            ),
        };

        let all = self.feed.incidents().await?;
        Ok(filter_incidents(&all, line, kind))
    }

    /// The rider's stored home station, if any.
    pub async fn home(&self, user_id: &str) -> Result<Option<String>, TripError> {
        self.home
            .home_of(user_id)
            .await
            .map_err(|_| TripError::Persistence)
    }

    /// Validate a spoken station name and store it as the rider's home.
    /// Returns the resolved station so the caller can confirm the canonical
    /// name.
    pub async fn set_home(&self, user_id: &str, spoken: &str) -> Result<Station, TripError> {
        let station = self
            .resolver
            .lookup_station(spoken)
            .ok_or_else(|| TripError::InvalidStation(spoken.to_string()))?;

        self.home
            .set_home(user_id, station.name())
            .await
            .map_err(|_| TripError::Persistence)?;

        debug!(user_id, home = %station, "home station updated");
        Ok(station)
    }

    /// Resolve one endpoint, insisting on a real station.
    async fn resolve_station(
        &self,
        text: Option<&str>,
        role: Role,
        user_id: &str,
    ) -> Result<Station, TripError> {
        match self.resolver.resolve(text, role, user_id, &self.home).await? {
            Resolved::Station(station) => Ok(station),
            Resolved::EasterEgg(_) => {
                unreachable!("joke termini are only recognized for destinations")
            }
        }
    }
}
