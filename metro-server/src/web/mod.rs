//! Web layer for the metro arrival tracker.
//!
//! Thin HTTP surface over the engine: JSON in, JSON out, engine errors
//! mapped to statuses. All phrasing of results is left to the caller.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::{AppEngine, AppState};
