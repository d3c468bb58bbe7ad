//! Catalog behavior tests against the in-memory store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use cvault_catalog::{Catalog, CatalogConfig, CatalogError, CollisionPolicy, DeleteOutcome};
use cvault_storage::{
    MemoryStore, ObjectInfo, ObjectListing, ObjectStore, StorageError, StorageResult,
};

const ORIGIN: &str = "https://cdn.test";

fn catalog(store: Arc<dyn ObjectStore>) -> Catalog {
    Catalog::new(
        store,
        CatalogConfig {
            public_origin: ORIGIN.to_string(),
            on_collision: CollisionPolicy::Overwrite,
        },
    )
}

fn strict_catalog(store: Arc<dyn ObjectStore>) -> Catalog {
    Catalog::new(
        store,
        CatalogConfig {
            public_origin: ORIGIN.to_string(),
            on_collision: CollisionPolicy::Reject,
        },
    )
}

async fn upload(catalog: &Catalog, folder: &str, name: &str) -> String {
    catalog
        .upload_video(folder, name, b"video-bytes".to_vec(), "video/mp4")
        .await
        .expect("upload failed")
        .key
}

#[tokio::test]
async fn reserved_folders_lead_the_listing_even_when_empty() {
    let catalog = catalog(Arc::new(MemoryStore::new()));

    let folders = catalog.list_folders().await.unwrap();
    assert_eq!(folders, vec!["Uncategorized", "Recycle Bin"]);
}

#[tokio::test]
async fn upload_materializes_every_ancestor_folder() {
    let catalog = catalog(Arc::new(MemoryStore::new()));
    upload(&catalog, "Trips/2024", "clip.mp4").await;

    let folders = catalog.list_folders().await.unwrap();
    assert!(folders.contains(&"Trips".to_string()));
    assert!(folders.contains(&"Trips/2024".to_string()));

    let videos = catalog.list_videos("Trips/2024").await.unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].name, "clip.mp4");
    assert_eq!(videos[0].folder, "Trips/2024");
    assert_eq!(videos[0].url, "https://cdn.test/Trips/2024/clip.mp4");

    // Folder membership is exact, not prefix-based
    assert!(catalog.list_videos("Trips").await.unwrap().is_empty());
    assert!(catalog.list_videos("Uncategorized").await.unwrap().is_empty());
}

#[tokio::test]
async fn uncategorized_lists_only_root_objects() {
    let catalog = catalog(Arc::new(MemoryStore::new()));
    upload(&catalog, "", "root.mp4").await;
    upload(&catalog, "Trips", "nested.mp4").await;

    let videos = catalog.list_videos("Uncategorized").await.unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].key, "root.mp4");
    assert_eq!(videos[0].folder, "Uncategorized");
}

#[tokio::test]
async fn placeholders_never_appear_as_videos() {
    let store = Arc::new(MemoryStore::new());
    let catalog = catalog(store.clone());
    catalog.create_folder("Trips").await.unwrap();
    upload(&catalog, "Trips", "clip.mp4").await;

    let videos = catalog.list_videos("Trips").await.unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].name, "clip.mp4");
}

#[tokio::test]
async fn create_folder_rejects_duplicates_and_reserved_names() {
    let catalog = catalog(Arc::new(MemoryStore::new()));

    catalog.create_folder("Trips").await.unwrap();
    assert!(catalog
        .list_folders()
        .await
        .unwrap()
        .contains(&"Trips".to_string()));

    let err = catalog.create_folder("Trips").await.unwrap_err();
    assert!(matches!(err, CatalogError::FolderAlreadyExists(_)));

    for reserved in ["Uncategorized", "Recycle Bin"] {
        let err = catalog.create_folder(reserved).await.unwrap_err();
        assert!(matches!(err, CatalogError::ReservedFolder(_)));
    }

    let err = catalog.create_folder("  ").await.unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));
}

#[tokio::test]
async fn create_folder_rejects_a_folder_live_through_nested_keys_only() {
    let catalog = catalog(Arc::new(MemoryStore::new()));
    upload(&catalog, "Trips/2024", "clip.mp4").await;

    // "Trips" holds no direct object, but a nested key keeps it live
    let err = catalog.create_folder("Trips").await.unwrap_err();
    assert!(matches!(err, CatalogError::FolderAlreadyExists(_)));
}

#[tokio::test]
async fn rename_folder_moves_the_whole_subtree() {
    let store = Arc::new(MemoryStore::new());
    let catalog = catalog(store.clone());
    upload(&catalog, "Trips/2024", "clip.mp4").await;
    catalog.create_folder("Trips/empty").await.unwrap();

    catalog.rename_folder("Trips", "Journeys").await.unwrap();

    let videos = catalog.list_videos("Journeys/2024").await.unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].key, "Journeys/2024/clip.mp4");

    let folders = catalog.list_folders().await.unwrap();
    assert!(!folders.iter().any(|f| f.starts_with("Trips")));
    assert!(folders.contains(&"Journeys/empty".to_string()));
    assert!(store.keys().await.iter().all(|k| !k.starts_with("Trips/")));
}

#[tokio::test]
async fn rename_folder_guards() {
    let catalog = catalog(Arc::new(MemoryStore::new()));
    upload(&catalog, "Trips", "clip.mp4").await;
    upload(&catalog, "Journeys", "other.mp4").await;

    let err = catalog.rename_folder("Trips", "Journeys").await.unwrap_err();
    assert!(matches!(err, CatalogError::FolderAlreadyExists(_)));

    let err = catalog
        .rename_folder("Recycle Bin", "Anything")
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::ReservedFolder(_)));

    let err = catalog
        .rename_folder("Trips", "Uncategorized")
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::ReservedFolder(_)));

    // Destination nested inside the source would chase its own copies
    let err = catalog.rename_folder("Trips", "Trips/sub").await.unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));

    let err = catalog.rename_folder("Missing", "Target").await.unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));
}

#[tokio::test]
async fn delete_folder_refuses_while_videos_exist_anywhere_below() {
    let store = Arc::new(MemoryStore::new());
    let catalog = catalog(store.clone());
    catalog.create_folder("Trips").await.unwrap();
    catalog.create_folder("Trips/2024").await.unwrap();
    upload(&catalog, "Trips/2024/summer", "clip.mp4").await;

    // The video sits two levels down; deletion is still refused
    let err = catalog.delete_folder("Trips").await.unwrap_err();
    assert!(matches!(err, CatalogError::FolderNotEmpty(_)));

    catalog
        .delete_video("Trips/2024/summer/clip.mp4")
        .await
        .unwrap();

    catalog.delete_folder("Trips").await.unwrap();
    assert!(store.keys().await.iter().all(|k| !k.starts_with("Trips/")));

    let folders = catalog.list_folders().await.unwrap();
    assert_eq!(folders, vec!["Uncategorized", "Recycle Bin"]);
}

#[tokio::test]
async fn delete_folder_rejects_reserved_names() {
    let catalog = catalog(Arc::new(MemoryStore::new()));
    for reserved in ["Uncategorized", "Recycle Bin"] {
        let err = catalog.delete_folder(reserved).await.unwrap_err();
        assert!(matches!(err, CatalogError::ReservedFolder(_)));
    }
}

#[tokio::test]
async fn delete_video_recycles_then_purges() {
    let store = Arc::new(MemoryStore::new());
    let catalog = catalog(store.clone());
    let key = upload(&catalog, "Trips", "clip.mp4").await;

    let outcome = catalog.delete_video(&key).await.unwrap();
    let recycle_key = match outcome {
        DeleteOutcome::Recycled { recycle_key } => recycle_key,
        other => panic!("expected Recycled, got {:?}", other),
    };

    assert!(recycle_key.starts_with("Recycle Bin/"));
    assert!(!store.exists(&key).await.unwrap());
    assert!(store.exists(&recycle_key).await.unwrap());

    let entries = catalog.list_recycle_bin().await.unwrap();
    assert_eq!(entries.len(), 1);
    let source = entries[0].source.as_ref().expect("entry should decode");
    assert_eq!(source.folder, "Trips");
    assert_eq!(source.file_name, "clip.mp4");

    let outcome = catalog.delete_video(&recycle_key).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Purged);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn restore_returns_the_asset_to_its_original_location() {
    let store = Arc::new(MemoryStore::new());
    let catalog = catalog(store.clone());
    let key = upload(&catalog, "Trips", "clip.mp4").await;
    let before = catalog.list_videos("Trips").await.unwrap();

    let recycle_key = catalog.soft_delete(&key).await.unwrap();
    assert!(catalog.list_videos("Trips").await.unwrap().is_empty());

    let restored = catalog.restore_video(&recycle_key).await.unwrap();
    assert_eq!(restored, key);
    assert!(!store.exists(&recycle_key).await.unwrap());

    let after = catalog.list_videos("Trips").await.unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].name, before[0].name);
    assert_eq!(after[0].folder, before[0].folder);
}

#[tokio::test]
async fn restore_requires_a_recycle_bin_key() {
    let catalog = catalog(Arc::new(MemoryStore::new()));
    let key = upload(&catalog, "Trips", "clip.mp4").await;

    let err = catalog.restore_video(&key).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotInRecycleBin(_)));
}

#[tokio::test]
async fn out_of_band_recycle_entries_are_listed_but_not_restored() {
    let store = Arc::new(MemoryStore::new());
    let catalog = catalog(store.clone());
    store
        .put_bytes("Recycle Bin/stray-object", vec![1], "video/mp4")
        .await
        .unwrap();

    let entries = catalog.list_recycle_bin().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].source.is_none());

    let err = catalog
        .restore_video("Recycle Bin/stray-object")
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Codec(_)));
    // Nothing moved
    assert!(store.exists("Recycle Bin/stray-object").await.unwrap());
}

#[tokio::test]
async fn move_probes_the_destination_and_leaves_conflicts_untouched() {
    let store = Arc::new(MemoryStore::new());
    let catalog = catalog(store.clone());
    let source = upload(&catalog, "Trips", "clip.mp4").await;
    let conflicting = upload(&catalog, "Journeys", "clip.mp4").await;

    let err = catalog.move_video(&source, "Journeys").await.unwrap_err();
    assert!(matches!(err, CatalogError::DestinationConflict(_)));
    assert!(store.exists(&source).await.unwrap());
    assert!(store.exists(&conflicting).await.unwrap());

    let err = catalog.move_video(&source, "Trips").await.unwrap_err();
    assert!(matches!(err, CatalogError::NoOpMove));

    let moved = catalog.move_video(&source, "Archive").await.unwrap();
    assert_eq!(moved, "Archive/clip.mp4");
    assert!(!store.exists(&source).await.unwrap());
}

#[tokio::test]
async fn move_to_uncategorized_lands_at_the_root() {
    let store = Arc::new(MemoryStore::new());
    let catalog = catalog(store.clone());
    let key = upload(&catalog, "Trips", "clip.mp4").await;

    let moved = catalog.move_video(&key, "Uncategorized").await.unwrap();
    assert_eq!(moved, "clip.mp4");
    assert!(store.exists("clip.mp4").await.unwrap());
}

#[tokio::test]
async fn move_into_the_recycle_bin_is_rejected() {
    let catalog = catalog(Arc::new(MemoryStore::new()));
    let key = upload(&catalog, "Trips", "clip.mp4").await;

    let err = catalog.move_video(&key, "Recycle Bin").await.unwrap_err();
    assert!(matches!(err, CatalogError::ReservedFolder(_)));
}

#[tokio::test]
async fn rename_video_replaces_only_the_final_segment() {
    let store = Arc::new(MemoryStore::new());
    let catalog = catalog(store.clone());
    let key = upload(&catalog, "Trips/2024", "clip.mp4").await;

    let new_key = catalog.rename_video(&key, "best-clip.mp4").await.unwrap();
    assert_eq!(new_key, "Trips/2024/best-clip.mp4");
    assert!(!store.exists(&key).await.unwrap());
    assert!(store.exists(&new_key).await.unwrap());

    let err = catalog.rename_video(&new_key, "  ").await.unwrap_err();
    assert!(matches!(err, CatalogError::NewNameRequired));
}

#[tokio::test]
async fn same_name_rename_is_a_no_op_that_keeps_the_object() {
    let store = Arc::new(MemoryStore::new());
    let catalog = catalog(store.clone());
    let key = upload(&catalog, "Trips", "clip.mp4").await;

    let new_key = catalog.rename_video(&key, "clip.mp4").await.unwrap();
    assert_eq!(new_key, key);
    assert!(store.exists(&key).await.unwrap());
}

#[tokio::test]
async fn collision_policy_governs_rename_and_restore_destinations() {
    // Default policy: silent overwrite, as the legacy system behaved
    let store = Arc::new(MemoryStore::new());
    let lenient = catalog(store.clone());
    let a = upload(&lenient, "Trips", "a.mp4").await;
    upload(&lenient, "Trips", "b.mp4").await;

    let renamed = lenient.rename_video(&a, "b.mp4").await.unwrap();
    assert_eq!(renamed, "Trips/b.mp4");
    assert_eq!(lenient.list_videos("Trips").await.unwrap().len(), 1);

    // Reject policy: surface the conflict instead
    let store = Arc::new(MemoryStore::new());
    let strict = strict_catalog(store.clone());
    let a = upload(&strict, "Trips", "a.mp4").await;
    upload(&strict, "Trips", "b.mp4").await;

    let err = strict.rename_video(&a, "b.mp4").await.unwrap_err();
    assert!(matches!(err, CatalogError::DestinationConflict(_)));
    assert!(store.exists(&a).await.unwrap());

    let recycle_key = strict.soft_delete(&a).await.unwrap();
    upload(&strict, "Trips", "a.mp4").await;
    let err = strict.restore_video(&recycle_key).await.unwrap_err();
    assert!(matches!(err, CatalogError::DestinationConflict(_)));
}

#[tokio::test]
async fn upload_validations() {
    let catalog = catalog(Arc::new(MemoryStore::new()));

    let err = catalog
        .upload_video("Trips", "", b"x".to_vec(), "video/mp4")
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));

    let err = catalog
        .upload_video("Trips", "a/b.mp4", b"x".to_vec(), "video/mp4")
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));

    let err = catalog
        .upload_video("Recycle Bin", "clip.mp4", b"x".to_vec(), "video/mp4")
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::ReservedFolder(_)));
}

// ---------------------------------------------------------------------------
// Partial-failure surfacing
// ---------------------------------------------------------------------------

/// Store wrapper that starts failing deletes after a set number succeed.
struct FlakyDeletes {
    inner: MemoryStore,
    allowed: usize,
    deletes: AtomicUsize,
}

impl FlakyDeletes {
    fn new(inner: MemoryStore, allowed: usize) -> Self {
        Self {
            inner,
            allowed,
            deletes: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ObjectStore for FlakyDeletes {
    async fn put_bytes(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<()> {
        self.inner.put_bytes(key, data, content_type).await
    }

    async fn get_bytes(&self, key: &str) -> StorageResult<Bytes> {
        self.inner.get_bytes(key).await
    }

    async fn copy(&self, from_key: &str, to_key: &str) -> StorageResult<()> {
        self.inner.copy(from_key, to_key).await
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        if self.deletes.fetch_add(1, Ordering::SeqCst) >= self.allowed {
            return Err(StorageError::DeleteFailed("injected failure".to_string()));
        }
        self.inner.delete(key).await
    }

    async fn delete_many(&self, keys: &[String]) -> StorageResult<u32> {
        self.inner.delete_many(keys).await
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<ObjectInfo>> {
        self.inner.list(prefix).await
    }

    async fn list_with_delimiter(
        &self,
        prefix: &str,
        delimiter: &str,
    ) -> StorageResult<ObjectListing> {
        self.inner.list_with_delimiter(prefix, delimiter).await
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        self.inner.exists(key).await
    }

    async fn check_connectivity(&self) -> StorageResult<()> {
        self.inner.check_connectivity().await
    }
}

#[tokio::test]
async fn folder_rename_reports_how_far_it_got() {
    let inner = MemoryStore::new();
    for name in ["a.mp4", "b.mp4", "c.mp4"] {
        inner
            .put_bytes(&format!("Trips/{}", name), vec![0], "video/mp4")
            .await
            .unwrap();
    }

    // First delete succeeds, second fails: one object fully moved, one
    // duplicated, one untouched.
    let store = Arc::new(FlakyDeletes::new(inner, 1));
    let catalog = catalog(store.clone());

    let err = catalog.rename_folder("Trips", "Journeys").await.unwrap_err();
    match err {
        CatalogError::PartialRename {
            completed, total, ..
        } => {
            assert_eq!(completed, 1);
            assert_eq!(total, 3);
        }
        other => panic!("expected PartialRename, got {:?}", other),
    }

    // Copy-before-delete kept the second object at its source
    assert!(store.exists("Trips/b.mp4").await.unwrap());
    assert!(store.exists("Journeys/b.mp4").await.unwrap());
}

#[tokio::test]
async fn failed_delete_after_copy_surfaces_the_duplicate() {
    let inner = MemoryStore::new();
    inner
        .put_bytes("Trips/clip.mp4", vec![0], "video/mp4")
        .await
        .unwrap();

    let store = Arc::new(FlakyDeletes::new(inner, 0));
    let catalog = catalog(store.clone());

    let err = catalog.soft_delete("Trips/clip.mp4").await.unwrap_err();
    match err {
        CatalogError::PartialApplication {
            original,
            duplicate,
            ..
        } => {
            assert_eq!(original, "Trips/clip.mp4");
            assert!(duplicate.starts_with("Recycle Bin/"));
            // Both locations hold the object until the caller reconciles
            assert!(store.exists(&original).await.unwrap());
            assert!(store.exists(&duplicate).await.unwrap());
        }
        other => panic!("expected PartialApplication, got {:?}", other),
    }
}
