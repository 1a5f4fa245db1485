//! Spoken-text to station resolution.
//!
//! Turns the raw origin/destination text of a request into [`Station`]
//! values: normalizes mishearings, falls back to the rider's home station,
//! and recognizes the two joke termini that must be passed through rather
//! than matched against the live feed.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::domain::{Station, TripError};
use crate::home::HomeStore;
use crate::stations::{StationDirectory, essentialize};

/// Phrases that mean "my home station".
const HOME_WORDS: [&str; 3] = ["here", "home", "my home"];

/// Which endpoint of the trip is being resolved. Decides which error is
/// reported on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Origin,
    Destination,
}

/// The two terminus names that are recognized but are not stations. The
/// presentation layer answers these itself; they never reach the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EasterEgg {
    Mordor,
    Dulles,
}

impl EasterEgg {
    fn parse(lower: &str) -> Option<EasterEgg> {
        match lower {
            "mordor" => Some(EasterEgg::Mordor),
            "dulles" => Some(EasterEgg::Dulles),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EasterEgg::Mordor => "mordor",
            EasterEgg::Dulles => "dulles",
        }
    }
}

impl fmt::Display for EasterEgg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of resolving one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Station(Station),
    EasterEgg(EasterEgg),
}

/// Resolves spoken station references against the directory and the rider's
/// home station.
#[derive(Clone)]
pub struct NameResolver {
    directory: Arc<StationDirectory>,
}

impl NameResolver {
    pub fn new(directory: Arc<StationDirectory>) -> Self {
        Self { directory }
    }

    /// Resolve spoken text for one endpoint of a trip.
    ///
    /// `text` of `None` (or blank) means the rider named no station; for an
    /// origin that falls back to the home station. Explicit home words fall
    /// back for either role. Store failures surface as `Persistence`.
    pub async fn resolve<H: HomeStore>(
        &self,
        text: Option<&str>,
        role: Role,
        user_id: &str,
        home: &H,
    ) -> Result<Resolved, TripError> {
        let spoken = text.map(str::trim).filter(|t| !t.is_empty());

        let Some(spoken) = spoken else {
            return self.resolve_home(role, false, user_id, home).await;
        };

        let canonical = essentialize(spoken);
        let lower = canonical.to_lowercase();

        if HOME_WORDS.contains(&lower.as_str()) {
            return self.resolve_home(role, true, user_id, home).await;
        }

        if role == Role::Destination {
            if let Some(egg) = EasterEgg::parse(&lower) {
                return Ok(Resolved::EasterEgg(egg));
            }
        }

        match self.directory.resolve(&canonical) {
            Some(station) => Ok(Resolved::Station(station)),
            None => Err(unrecognized(role, spoken)),
        }
    }

    /// Fall back to the rider's stored home station.
    async fn resolve_home<H: HomeStore>(
        &self,
        role: Role,
        explicit: bool,
        user_id: &str,
        home: &H,
    ) -> Result<Resolved, TripError> {
        let stored = home
            .home_of(user_id)
            .await
            .map_err(|_| TripError::Persistence)?;

        let Some(name) = stored else {
            // An origin the rider simply omitted is a different failure from
            // an explicit "home" request: the first asks for any origin, the
            // second asks them to set a home first.
            return if role == Role::Origin && !explicit {
                Err(TripError::NoOrigin)
            } else {
                Err(TripError::NoHome)
            };
        };

        debug!(user_id, home = %name, "using home station");

        // Stored homes are canonical display names; no normalization needed.
        match self.directory.resolve(&name) {
            Some(station) => Ok(Resolved::Station(station)),
            None => Err(unrecognized(role, &name)),
        }
    }

    /// Validate a spoken station name without home fallback (used when
    /// updating the stored home itself).
    pub fn lookup_station(&self, text: &str) -> Option<Station> {
        self.directory.resolve(&essentialize(text))
    }
}

fn unrecognized(role: Role, spoken: &str) -> TripError {
    match role {
        Role::Origin => TripError::InvalidStation(spoken.to_string()),
        Role::Destination => TripError::InvalidDestination(spoken.to_string()),
    }
}
