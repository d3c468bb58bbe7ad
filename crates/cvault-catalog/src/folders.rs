//! Folder directory index.
//!
//! A folder is live iff at least one object key has `folder/` as a
//! strict prefix; empty folders are held live by a zero-byte `.keep`
//! placeholder. `Uncategorized` and `Recycle Bin` are synthetic: always
//! listed, never creatable, renameable, or deletable.

use tracing::{info, warn};

use cvault_models::{
    folder_prefix, is_reserved_folder, is_video_key, FOLDER_PLACEHOLDER, RECYCLE_BIN, UNCATEGORIZED,
};

use crate::error::{CatalogError, CatalogResult};
use crate::Catalog;

impl Catalog {
    /// List every live logical folder.
    ///
    /// Walks common prefixes level by level from the root, descending
    /// into each discovered prefix. The two reserved folders lead the
    /// result regardless of bucket contents; discovered folders follow
    /// in depth-first listing order, stable within one call.
    pub async fn list_folders(&self) -> CatalogResult<Vec<String>> {
        let mut discovered = Vec::new();
        let mut stack = vec![String::new()];

        while let Some(prefix) = stack.pop() {
            if !prefix.is_empty() {
                discovered.push(prefix.trim_end_matches('/').to_string());
            }

            let listing = self.store().list_with_delimiter(&prefix, "/").await?;
            // reversed so the stack pops children in listing order
            for common in listing.common_prefixes.iter().rev() {
                if common.trim_end_matches('/') == UNCATEGORIZED {
                    continue;
                }
                stack.push(common.clone());
            }
        }

        let mut folders = vec![UNCATEGORIZED.to_string(), RECYCLE_BIN.to_string()];
        folders.extend(discovered.into_iter().filter(|f| f != RECYCLE_BIN));
        Ok(folders)
    }

    /// Create a folder by writing its placeholder object.
    pub async fn create_folder(&self, path: &str) -> CatalogResult<()> {
        Self::ensure_well_formed_folder(path)?;
        if is_reserved_folder(path) {
            return Err(CatalogError::reserved(path));
        }
        if self.folder_is_live(path).await? {
            return Err(CatalogError::FolderAlreadyExists(path.to_string()));
        }

        let placeholder = format!("{}/{}", path, FOLDER_PLACEHOLDER);
        self.store()
            .put_bytes(&placeholder, Vec::new(), "application/octet-stream")
            .await?;

        info!("Created folder {}", path);
        Ok(())
    }

    /// Rename a folder by re-prefixing every object under it.
    ///
    /// Objects are processed as sequential copy+delete pairs; a failure
    /// aborts immediately and reports how many of the set had fully
    /// moved. No rollback is attempted.
    pub async fn rename_folder(&self, old_path: &str, new_path: &str) -> CatalogResult<()> {
        Self::ensure_well_formed_folder(old_path)?;
        Self::ensure_well_formed_folder(new_path)?;
        if is_reserved_folder(old_path) {
            return Err(CatalogError::reserved(old_path));
        }
        if is_reserved_folder(new_path) {
            return Err(CatalogError::reserved(new_path));
        }
        // The copy loop below would generate keys inside the set it is
        // iterating when the destination nests under the source.
        if new_path == old_path || new_path.starts_with(&format!("{}/", old_path)) {
            return Err(CatalogError::validation(
                "Target folder cannot be the source folder or nested inside it",
            ));
        }
        if self.folder_is_live(new_path).await? {
            return Err(CatalogError::FolderAlreadyExists(new_path.to_string()));
        }

        let old_prefix = folder_prefix(old_path);
        let new_prefix = folder_prefix(new_path);
        let objects = self.store().list(&old_prefix).await?;
        if objects.is_empty() {
            return Err(CatalogError::validation(format!(
                "Folder does not exist: {}",
                old_path
            )));
        }

        let total = objects.len();
        for (completed, object) in objects.iter().enumerate() {
            let new_key = format!("{}{}", new_prefix, &object.key[old_prefix.len()..]);

            if let Err(source) = self.store().copy(&object.key, &new_key).await {
                warn!(
                    "Folder rename {} -> {} aborted at {}/{}: {}",
                    old_path, new_path, completed, total, source
                );
                return Err(CatalogError::PartialRename {
                    completed,
                    total,
                    source,
                });
            }
            if let Err(source) = self.store().delete(&object.key).await {
                warn!(
                    "Folder rename {} -> {} aborted at {}/{}: {}",
                    old_path, new_path, completed, total, source
                );
                return Err(CatalogError::PartialRename {
                    completed,
                    total,
                    source,
                });
            }
        }

        info!("Renamed folder {} -> {} ({} objects)", old_path, new_path, total);
        Ok(())
    }

    /// Delete a folder and everything under it, placeholders included.
    ///
    /// Refused while any video exists anywhere below the folder, however
    /// deeply nested.
    pub async fn delete_folder(&self, path: &str) -> CatalogResult<()> {
        Self::ensure_well_formed_folder(path)?;
        if is_reserved_folder(path) {
            return Err(CatalogError::reserved(path));
        }

        let prefix = folder_prefix(path);
        let objects = self.store().list(&prefix).await?;

        if objects.iter().any(|o| is_video_key(&o.key)) {
            return Err(CatalogError::FolderNotEmpty(path.to_string()));
        }

        if !objects.is_empty() {
            let keys: Vec<String> = objects.into_iter().map(|o| o.key).collect();
            let removed = self.store().delete_many(&keys).await?;
            info!("Deleted folder {} ({} objects)", path, removed);
        }

        Ok(())
    }

    /// A folder is live when any key sits under its prefix.
    async fn folder_is_live(&self, path: &str) -> CatalogResult<bool> {
        let listing = self
            .store()
            .list_with_delimiter(&folder_prefix(path), "/")
            .await?;
        Ok(!listing.objects.is_empty() || !listing.common_prefixes.is_empty())
    }
}
