//! Application state for the web layer.

use std::sync::Arc;

use crate::engine::Engine;
use crate::home::JsonFileHomeStore;
use crate::wmata::{CachedFeed, WmataClient};

/// The engine as wired for production: cached HTTP feed, file-backed homes.
pub type AppEngine = Engine<CachedFeed<WmataClient>, JsonFileHomeStore>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The request engine.
    pub engine: Arc<AppEngine>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(engine: AppEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}
