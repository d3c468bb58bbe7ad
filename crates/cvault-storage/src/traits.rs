//! The flat key-value capability backing the folder/video catalog.
//!
//! The store has no concept of directories. Listing with a `/` delimiter
//! yields one level of common prefixes; everything else is opaque keys.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::error::StorageResult;

/// Information about a stored object.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectInfo {
    /// Object key
    pub key: String,
    /// Size in bytes
    pub size: u64,
    /// Last modified timestamp
    pub last_modified: Option<DateTime<Utc>>,
}

/// One page-merged result of a delimiter listing.
#[derive(Debug, Clone, Default)]
pub struct ObjectListing {
    /// Objects directly under the prefix.
    pub objects: Vec<ObjectInfo>,
    /// Common prefixes one delimiter level down, each ending with the
    /// delimiter, deduplicated, in the store's listing order.
    pub common_prefixes: Vec<String>,
}

/// Flat object-store capability.
///
/// Implementations must be safe to share across request handlers; all
/// state lives behind the store itself. There are no multi-key
/// transactions: callers sequence copy/delete pairs and surface partial
/// failures to their own callers.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write an object, overwriting any existing object at `key`.
    async fn put_bytes(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<()>;

    /// Read an object's bytes.
    async fn get_bytes(&self, key: &str) -> StorageResult<Bytes>;

    /// Server-side copy. Fails with `NotFound` when the source is absent.
    async fn copy(&self, from_key: &str, to_key: &str) -> StorageResult<()>;

    /// Delete an object. Deleting an absent key succeeds.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Delete a batch of objects; returns the number of keys processed.
    async fn delete_many(&self, keys: &[String]) -> StorageResult<u32>;

    /// List every object under a prefix, following pagination to the end.
    async fn list(&self, prefix: &str) -> StorageResult<Vec<ObjectInfo>>;

    /// List one level under a prefix: objects plus common prefixes.
    async fn list_with_delimiter(
        &self,
        prefix: &str,
        delimiter: &str,
    ) -> StorageResult<ObjectListing>;

    /// Check whether an object exists at `key`.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Verify the backing store is reachable.
    async fn check_connectivity(&self) -> StorageResult<()>;
}
