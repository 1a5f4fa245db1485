//! Domain types for the metro arrival tracker.
//!
//! This module contains the core domain model types that represent validated
//! transit data. All types enforce their invariants at construction time, so
//! code that receives these types can trust their validity.

mod arrival;
mod error;
mod line;
mod station;

pub use arrival::{ArrivalRecord, MINUTES_ARRIVING, MINUTES_BOARDING};
pub use error::TripError;
pub use line::{FeedLine, Line, LineChoice};
pub use station::{InvalidStationCode, Platform, Station, StationCode};
