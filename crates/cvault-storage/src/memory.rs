//! In-memory object store.
//!
//! Implements the same semantics as the S3 backend (overwriting puts,
//! silent deletes of absent keys, delimiter listings) over a `BTreeMap`,
//! so listing order is stable. Used by tests and local development.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::{StorageError, StorageResult};
use crate::traits::{ObjectInfo, ObjectListing, ObjectStore};

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    last_modified: DateTime<Utc>,
}

/// In-process object store keyed by full storage key.
#[derive(Clone, Default)]
pub struct MemoryStore {
    objects: Arc<RwLock<BTreeMap<String, StoredObject>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects (test assertions).
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    /// Snapshot of all keys in listing order (test assertions).
    pub async fn keys(&self) -> Vec<String> {
        self.objects.read().await.keys().cloned().collect()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put_bytes(&self, key: &str, data: Vec<u8>, _content_type: &str) -> StorageResult<()> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey("empty key".to_string()));
        }
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                data: Bytes::from(data),
                last_modified: Utc::now(),
            },
        );
        Ok(())
    }

    async fn get_bytes(&self, key: &str) -> StorageResult<Bytes> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|o| o.data.clone())
            .ok_or_else(|| StorageError::not_found(key))
    }

    async fn copy(&self, from_key: &str, to_key: &str) -> StorageResult<()> {
        let mut objects = self.objects.write().await;
        let source = objects
            .get(from_key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(from_key))?;
        objects.insert(
            to_key.to_string(),
            StoredObject {
                data: source.data,
                last_modified: Utc::now(),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        // Matches S3: deleting an absent key is not an error
        self.objects.write().await.remove(key);
        Ok(())
    }

    async fn delete_many(&self, keys: &[String]) -> StorageResult<u32> {
        let mut objects = self.objects.write().await;
        for key in keys {
            objects.remove(key);
        }
        Ok(keys.len() as u32)
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<ObjectInfo>> {
        let objects = self.objects.read().await;
        Ok(objects
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, obj)| ObjectInfo {
                key: key.clone(),
                size: obj.data.len() as u64,
                last_modified: Some(obj.last_modified),
            })
            .collect())
    }

    async fn list_with_delimiter(
        &self,
        prefix: &str,
        delimiter: &str,
    ) -> StorageResult<ObjectListing> {
        let objects = self.objects.read().await;
        let mut listing = ObjectListing::default();

        for (key, obj) in objects.iter() {
            let Some(rest) = key.strip_prefix(prefix) else {
                continue;
            };
            match rest.find(delimiter) {
                Some(pos) => {
                    let common = format!("{}{}", prefix, &rest[..pos + delimiter.len()]);
                    if !listing.common_prefixes.iter().any(|c| c == &common) {
                        listing.common_prefixes.push(common);
                    }
                }
                None => listing.objects.push(ObjectInfo {
                    key: key.clone(),
                    size: obj.data.len() as u64,
                    last_modified: Some(obj.last_modified),
                }),
            }
        }

        Ok(listing)
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.objects.read().await.contains_key(key))
    }

    async fn check_connectivity(&self) -> StorageResult<()> {
        Ok(())
    }
}
