//! Asset lifecycle: Active -> Recycled -> Restored | Purged.
//!
//! Every composite operation copies before it deletes. A failure between
//! the two steps leaves the original object intact plus a transient
//! duplicate, surfaced as `PartialApplication`; a failed copy leaves the
//! store exactly as it was. The ordering is never reversed.

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use cvault_models::{
    encode_recycle_key, file_name, is_reserved_folder, split_key, to_storage_key,
    RECYCLE_BIN, RECYCLE_BIN_PREFIX, UNCATEGORIZED,
};

use crate::error::{CatalogError, CatalogResult};
use crate::{Catalog, CollisionPolicy};

/// What `delete_video` did with the key it was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum DeleteOutcome {
    /// Active asset moved into the Recycle Bin.
    #[serde(rename_all = "camelCase")]
    Recycled { recycle_key: String },
    /// Recycle Bin entry deleted permanently.
    Purged,
}

impl Catalog {
    /// Delete a video: soft-delete when active, permanent purge when the
    /// key is already in the Recycle Bin.
    pub async fn delete_video(&self, key: &str) -> CatalogResult<DeleteOutcome> {
        Self::ensure_key(key)?;

        if key.starts_with(RECYCLE_BIN_PREFIX) {
            self.purge(key).await?;
            Ok(DeleteOutcome::Purged)
        } else {
            let recycle_key = self.soft_delete(key).await?;
            Ok(DeleteOutcome::Recycled { recycle_key })
        }
    }

    /// Move an active asset into the Recycle Bin, encoding its original
    /// location and the deletion time into the new key.
    pub async fn soft_delete(&self, key: &str) -> CatalogResult<String> {
        Self::ensure_key(key)?;
        if key.starts_with(RECYCLE_BIN_PREFIX) {
            return Err(CatalogError::validation(
                "Key is already in the Recycle Bin; purge it instead",
            ));
        }

        let (folder, name) = split_key(key);
        let recycle_key = encode_recycle_key(&folder, &name, Utc::now().timestamp_millis());

        self.store().copy(key, &recycle_key).await?;
        self.finish_with_delete(key, &recycle_key).await?;

        info!("Recycled {} -> {}", key, recycle_key);
        Ok(recycle_key)
    }

    /// Permanently delete a Recycle Bin entry. Terminal.
    pub async fn purge(&self, key: &str) -> CatalogResult<()> {
        Self::ensure_key(key)?;
        if !key.starts_with(RECYCLE_BIN_PREFIX) {
            return Err(CatalogError::NotInRecycleBin(key.to_string()));
        }

        self.store().delete(key).await?;
        info!("Purged {}", key);
        Ok(())
    }

    /// Restore a Recycle Bin entry to its decoded original location.
    pub async fn restore_video(&self, key: &str) -> CatalogResult<String> {
        Self::ensure_key(key)?;
        if !key.starts_with(RECYCLE_BIN_PREFIX) {
            return Err(CatalogError::NotInRecycleBin(key.to_string()));
        }

        let source = cvault_models::decode_recycle_key(key)?;
        let restore_key = source.restore_key();

        if self.collision_policy() == CollisionPolicy::Reject
            && self.store().exists(&restore_key).await?
        {
            return Err(CatalogError::DestinationConflict(restore_key));
        }

        self.store().copy(key, &restore_key).await?;
        self.finish_with_delete(key, &restore_key).await?;

        info!("Restored {} -> {}", key, restore_key);
        Ok(restore_key)
    }

    /// Rename an active asset in place: same folder, new final segment.
    pub async fn rename_video(&self, key: &str, new_name: &str) -> CatalogResult<String> {
        Self::ensure_key(key)?;
        if new_name.trim().is_empty() {
            return Err(CatalogError::NewNameRequired);
        }
        if new_name.contains('/') {
            return Err(CatalogError::validation(format!(
                "File name may not contain '/': {}",
                new_name
            )));
        }
        if key.starts_with(RECYCLE_BIN_PREFIX) {
            return Err(CatalogError::validation(
                "Recycle Bin entries cannot be renamed",
            ));
        }

        let (folder, _) = split_key(key);
        let new_key = to_storage_key(&folder, new_name);

        // Copying a key onto itself and then deleting it would drop the
        // object; a same-name rename is a no-op instead.
        if new_key == key {
            return Ok(new_key);
        }

        if self.collision_policy() == CollisionPolicy::Reject
            && self.store().exists(&new_key).await?
        {
            return Err(CatalogError::DestinationConflict(new_key));
        }

        self.store().copy(key, &new_key).await?;
        self.finish_with_delete(key, &new_key).await?;

        info!("Renamed {} -> {}", key, new_key);
        Ok(new_key)
    }

    /// Move an active asset to another folder, keeping its file name.
    ///
    /// Unlike rename/restore, the destination is always probed first; an
    /// existing object there fails the move and touches nothing.
    pub async fn move_video(&self, key: &str, target_folder: &str) -> CatalogResult<String> {
        Self::ensure_key(key)?;
        if key.starts_with(RECYCLE_BIN_PREFIX) {
            return Err(CatalogError::validation(
                "Recycle Bin entries cannot be moved; restore them instead",
            ));
        }
        if target_folder == RECYCLE_BIN || target_folder.starts_with(RECYCLE_BIN_PREFIX) {
            return Err(CatalogError::reserved(RECYCLE_BIN));
        }
        if !target_folder.is_empty() && target_folder != UNCATEGORIZED {
            Self::ensure_well_formed_folder(target_folder)?;
        }

        let new_key = to_storage_key(target_folder, file_name(key));
        if new_key == key {
            return Err(CatalogError::NoOpMove);
        }
        if self.store().exists(&new_key).await? {
            return Err(CatalogError::DestinationConflict(new_key));
        }

        self.store().copy(key, &new_key).await?;
        self.finish_with_delete(key, &new_key).await?;

        info!("Moved {} -> {}", key, new_key);
        Ok(new_key)
    }

    fn ensure_key(key: &str) -> CatalogResult<()> {
        if key.trim().is_empty() {
            return Err(CatalogError::validation("Storage key required"));
        }
        if is_reserved_folder(key) {
            return Err(CatalogError::reserved(key));
        }
        Ok(())
    }

    /// Second half of a copy-then-delete pair: a failed delete means the
    /// copy already landed, so the caller learns about the duplicate.
    async fn finish_with_delete(&self, original: &str, duplicate: &str) -> CatalogResult<()> {
        self.store()
            .delete(original)
            .await
            .map_err(|source| CatalogError::PartialApplication {
                original: original.to_string(),
                duplicate: duplicate.to_string(),
                source,
            })
    }
}
