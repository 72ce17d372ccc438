//! # Durable Key-Value Storage
//!
//! This module provides the device-local persistence used by the store
//! engine. Three independent keys hold the serialized catalog, cart and order
//! history; each value is an opaque serialized list, read and written
//! wholesale. There are no partial updates and no indexing.
//!
//! Each key maps to one JSON file under the storage root. A missing file
//! reads as "absent" rather than an error, so first run starts from a clean
//! slate.

use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::store_errors::StoreError;

/// Storage key for the persisted catalog snapshot
pub const INVENTORY_KEY: &str = "inventory";
/// Storage key for the persisted cart snapshot
pub const CART_KEY: &str = "cart";
/// Storage key for the order history, most-recent-first
pub const ORDERS_KEY: &str = "orders";

/// Handle to a directory of per-key JSON files
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Create a storage handle rooted at `root`. The directory is created
    /// lazily on first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Read and deserialize the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key has never been written. I/O and
    /// decode failures both surface as [`StoreError::StorageRead`].
    pub async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.path_for(key);

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No stored value for key '{key}'");
                return Ok(None);
            }
            Err(e) => {
                warn!("Failed to read key '{key}' from {}: {e}", path.display());
                return Err(StoreError::StorageRead(e.to_string()));
            }
        };

        let value = serde_json::from_str(&raw)
            .map_err(|e| StoreError::StorageRead(format!("corrupt value for key '{key}': {e}")))?;

        info!("Read {} bytes for key '{key}'", raw.len());
        Ok(Some(value))
    }

    /// Serialize `value` and write it wholesale under `key`, replacing any
    /// previous value.
    pub async fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StoreError::StorageWrite(e.to_string()))?;

        let raw = serde_json::to_string(value)
            .map_err(|e| StoreError::StorageWrite(e.to_string()))?;

        let path = self.path_for(key);
        tokio::fs::write(&path, &raw)
            .await
            .map_err(|e| StoreError::StorageWrite(e.to_string()))?;

        info!("Wrote {} bytes for key '{key}'", raw.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_read_missing_key_is_absent() {
        let dir = tempdir().unwrap();
        let storage = Storage::new(dir.path());

        let value: Option<Vec<String>> = storage.read("nothing-here").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_write_then_read_roundtrip() {
        let dir = tempdir().unwrap();
        let storage = Storage::new(dir.path());

        let items = vec!["flour".to_string(), "milk".to_string()];
        storage.write(CART_KEY, &items).await.unwrap();

        let restored: Option<Vec<String>> = storage.read(CART_KEY).await.unwrap();
        assert_eq!(restored, Some(items));
    }

    #[tokio::test]
    async fn test_write_replaces_previous_value() {
        let dir = tempdir().unwrap();
        let storage = Storage::new(dir.path());

        storage.write(ORDERS_KEY, &vec![1, 2, 3]).await.unwrap();
        storage.write(ORDERS_KEY, &vec![9]).await.unwrap();

        let restored: Option<Vec<i32>> = storage.read(ORDERS_KEY).await.unwrap();
        assert_eq!(restored, Some(vec![9]));
    }

    #[tokio::test]
    async fn test_corrupt_value_is_a_read_error() {
        let dir = tempdir().unwrap();
        let storage = Storage::new(dir.path());

        tokio::fs::write(dir.path().join("inventory.json"), "not json at all")
            .await
            .unwrap();

        let result: Result<Option<Vec<String>>, _> = storage.read(INVENTORY_KEY).await;
        assert!(matches!(result, Err(StoreError::StorageRead(_))));
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let dir = tempdir().unwrap();
        let storage = Storage::new(dir.path());

        storage.write(CART_KEY, &vec!["a"]).await.unwrap();

        let other: Option<Vec<String>> = storage.read(INVENTORY_KEY).await.unwrap();
        assert!(other.is_none());
    }
}
