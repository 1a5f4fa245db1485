//! The trip-validation error taxonomy.
//!
//! Every failure the engine can report is one of these tagged values. They
//! are returned, never panicked, and they carry the station/line names the
//! presentation layer needs to phrase the problem; the engine itself never
//! produces user-facing prose.

/// Why a request could not be answered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TripError {
    /// The spoken origin matched no station.
    #[error("unrecognized station: {0}")]
    InvalidStation(String),

    /// The spoken destination matched no station.
    #[error("unrecognized destination: {0}")]
    InvalidDestination(String),

    /// The rider asked for "home" but has no home station set.
    #[error("no home station set")]
    NoHome,

    /// No origin was given and there is no home station to fall back on.
    #[error("no origin station and no home station set")]
    NoOrigin,

    /// The requested line does not serve the origin.
    #[error("{station} does not service {line} line trains")]
    SrcLine { station: String, line: String },

    /// The requested line does not serve the destination.
    #[error("{station} does not service {line} line trains")]
    DstLine { station: String, line: String },

    /// Origin and destination share no line; the trip needs a transfer.
    #[error("{src} and {dst} do not share a line")]
    StationIntersection { src: String, dst: String },

    /// Origin and destination are the same station.
    #[error("origin and destination are both {0}")]
    SameStation(String),

    /// The live feed reported a line code we do not recognize.
    #[error("unknown line code: {0}")]
    UnknownLine(String),

    /// The transit data service could not be reached or answered garbage.
    #[error("problem reaching the transit data service")]
    Connection,

    /// The rider-settings store could not be reached.
    #[error("problem reaching the rider settings store")]
    Persistence,
}
