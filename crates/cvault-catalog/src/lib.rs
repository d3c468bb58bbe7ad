//! The ClipVault catalog: a nested folder tree simulated over a flat
//! object store.
//!
//! The store knows nothing about directories; this crate derives the
//! folder hierarchy from key prefixes, materializes empty folders with
//! zero-byte `.keep` placeholders, and implements every mutating video
//! operation (move/rename/soft-delete/restore/purge) as an ordered
//! copy-then-delete sequence. The bucket is the sole source of truth:
//! nothing here caches state across calls.

pub mod error;
pub mod folders;
pub mod lifecycle;
pub mod registry;

use std::sync::Arc;

use cvault_storage::ObjectStore;

pub use error::{CatalogError, CatalogResult};
pub use lifecycle::DeleteOutcome;

/// Destination-collision policy for `rename_video` and `restore_video`.
///
/// The system this replaces overwrote silently on both operations while
/// probing on `move_video`; the asymmetry is kept reachable but explicit.
/// `move_video` always probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Overwrite whatever is at the destination key (legacy behavior).
    #[default]
    Overwrite,
    /// Probe the destination and fail with `DestinationConflict`.
    Reject,
}

/// Catalog configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Content-delivery origin used to derive public URLs, including
    /// scheme (e.g. `https://cdn.example.com`).
    pub public_origin: String,
    /// Collision policy for rename/restore destinations.
    pub on_collision: CollisionPolicy,
}

/// The folder/video catalog service.
///
/// Cheap to clone; all state lives in the store.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn ObjectStore>,
    config: CatalogConfig,
}

impl Catalog {
    pub fn new(store: Arc<dyn ObjectStore>, config: CatalogConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    pub fn public_origin(&self) -> &str {
        &self.config.public_origin
    }

    pub(crate) fn collision_policy(&self) -> CollisionPolicy {
        self.config.on_collision
    }

    /// Reject folder paths that would corrupt the key namespace: empty
    /// paths, leading/trailing separators, and empty segments.
    pub(crate) fn ensure_well_formed_folder(path: &str) -> CatalogResult<()> {
        if path.trim().is_empty() {
            return Err(CatalogError::Validation("Folder name required".to_string()));
        }
        if path.starts_with('/') || path.ends_with('/') || path.split('/').any(str::is_empty) {
            return Err(CatalogError::Validation(format!(
                "Invalid folder path: {}",
                path
            )));
        }
        Ok(())
    }
}
