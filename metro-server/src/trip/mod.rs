//! Trip validation and arrival matching.

mod itinerary;
mod matcher;

pub use itinerary::{Direction, Geometry, Itinerary, Stops};
pub use matcher::filter_arrivals;
