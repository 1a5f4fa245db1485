//! Per-rider home-station storage.
//!
//! The engine only ever talks to the [`HomeStore`] trait; it is injected as
//! a capability so business logic never constructs its own persistence
//! client. Two implementations ship: an in-memory map for tests and a
//! JSON-file-backed store for running the server.

mod file;
mod memory;

pub use file::JsonFileHomeStore;
pub use memory::MemoryHomeStore;

/// Errors from a home-station store.
#[derive(Debug, thiserror::Error)]
pub enum HomeStoreError {
    /// Reading or writing the backing file failed
    #[error("home store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not valid JSON
    #[error("home store parse error: {message}")]
    Json { message: String },
}

/// Lookup and update of a rider's home station.
///
/// Stored values are canonical station display names; callers validate
/// spoken input before storing it.
pub trait HomeStore: Send + Sync {
    /// The rider's home station, if one is set.
    fn home_of(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Option<String>, HomeStoreError>> + Send;

    /// Set or replace the rider's home station.
    fn set_home(
        &self,
        user_id: &str,
        station: &str,
    ) -> impl Future<Output = Result<(), HomeStoreError>> + Send;
}
