//! JSON-file-backed home-station store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

use super::{HomeStore, HomeStoreError};

/// Home stations persisted as a single JSON object (`user_id -> station`).
///
/// The whole map is loaded at open and rewritten on every update. That is
/// plenty for the handful of riders a personal deployment serves; a real
/// multi-tenant deployment would swap in a database behind the same trait.
#[derive(Clone)]
pub struct JsonFileHomeStore {
    path: PathBuf,
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl JsonFileHomeStore {
    /// Open a store backed by `path`. A missing file is treated as empty;
    /// it is created on the first update.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HomeStoreError> {
        let path = path.as_ref().to_path_buf();

        let map = if path.exists() {
            let json = std::fs::read_to_string(&path)?;
            serde_json::from_str(&json).map_err(|e| HomeStoreError::Json {
                message: e.to_string(),
            })?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            inner: Arc::new(RwLock::new(map)),
        })
    }

    /// Number of riders with a stored home.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// True if no rider has a stored home.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

impl HomeStore for JsonFileHomeStore {
    async fn home_of(&self, user_id: &str) -> Result<Option<String>, HomeStoreError> {
        let guard = self.inner.read().await;
        Ok(guard.get(user_id).cloned())
    }

    async fn set_home(&self, user_id: &str, station: &str) -> Result<(), HomeStoreError> {
        // Hold the write lock across the file write so concurrent updates
        // cannot interleave a stale snapshot onto disk.
        let mut guard = self.inner.write().await;
        guard.insert(user_id.to_string(), station.to_string());

        let json = serde_json::to_string_pretty(&*guard).map_err(|e| HomeStoreError::Json {
            message: e.to_string(),
        })?;
        std::fs::write(&self.path, json)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileHomeStore::open(dir.path().join("homes.json")).unwrap();
        assert!(store.is_empty().await);
        assert_eq!(store.home_of("alice").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileHomeStore::open(dir.path().join("homes.json")).unwrap();

        store.set_home("alice", "Dupont Circle").await.unwrap();
        assert_eq!(
            store.home_of("alice").await.unwrap().as_deref(),
            Some("Dupont Circle")
        );
    }

    #[tokio::test]
    async fn homes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("homes.json");

        {
            let store = JsonFileHomeStore::open(&path).unwrap();
            store.set_home("alice", "Takoma").await.unwrap();
            store.set_home("bob", "Anacostia").await.unwrap();
        }

        let reopened = JsonFileHomeStore::open(&path).unwrap();
        assert_eq!(reopened.len().await, 2);
        assert_eq!(
            reopened.home_of("alice").await.unwrap().as_deref(),
            Some("Takoma")
        );
        assert_eq!(
            reopened.home_of("bob").await.unwrap().as_deref(),
            Some("Anacostia")
        );
    }

    #[tokio::test]
    async fn corrupt_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("homes.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            JsonFileHomeStore::open(&path),
            Err(HomeStoreError::Json { .. })
        ));
    }
}
