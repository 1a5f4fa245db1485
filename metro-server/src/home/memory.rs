//! In-memory home-station store.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::{HomeStore, HomeStoreError};

/// Thread-safe in-memory store. State is lost on restart; intended for
/// tests and local development.
#[derive(Clone, Default)]
pub struct MemoryHomeStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryHomeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with one rider's home (test convenience).
    pub fn with_home(user_id: impl Into<String>, station: impl Into<String>) -> Self {
        let mut map = HashMap::new();
        map.insert(user_id.into(), station.into());
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }
}

impl HomeStore for MemoryHomeStore {
    async fn home_of(&self, user_id: &str) -> Result<Option<String>, HomeStoreError> {
        let guard = self.inner.read().await;
        Ok(guard.get(user_id).cloned())
    }

    async fn set_home(&self, user_id: &str, station: &str) -> Result<(), HomeStoreError> {
        let mut guard = self.inner.write().await;
        guard.insert(user_id.to_string(), station.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_rider_has_no_home() {
        let store = MemoryHomeStore::new();
        assert_eq!(store.home_of("alice").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get() {
        let store = MemoryHomeStore::new();
        store.set_home("alice", "Dupont Circle").await.unwrap();
        assert_eq!(
            store.home_of("alice").await.unwrap().as_deref(),
            Some("Dupont Circle")
        );
    }

    #[tokio::test]
    async fn set_replaces_previous_home() {
        let store = MemoryHomeStore::with_home("alice", "Dupont Circle");
        store.set_home("alice", "Takoma").await.unwrap();
        assert_eq!(
            store.home_of("alice").await.unwrap().as_deref(),
            Some("Takoma")
        );
    }
}
