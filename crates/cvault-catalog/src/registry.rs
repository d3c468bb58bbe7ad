//! Video registry: listing and upload.
//!
//! Assets are materialized fresh from the live key set on every call;
//! nothing is cached between requests.

use tracing::{info, warn};

use cvault_models::{
    decode_recycle_key, folder_prefix, is_placeholder_key, split_key, to_storage_key,
    RecycleBinEntry, VideoAsset, RECYCLE_BIN, RECYCLE_BIN_PREFIX, UNCATEGORIZED,
};

use crate::error::{CatalogError, CatalogResult};
use crate::Catalog;

impl Catalog {
    /// List the videos directly inside a folder.
    ///
    /// Folder membership is an exact match on the key's parent path:
    /// listing `Trips` does not return videos under `Trips/2024`. For
    /// `Uncategorized` the listing prefix is empty, and the same filter
    /// keeps only root-level keys. Placeholders and directory markers are
    /// never surfaced. Order is whatever the store returns.
    pub async fn list_videos(&self, folder: &str) -> CatalogResult<Vec<VideoAsset>> {
        let folder = if folder.is_empty() {
            UNCATEGORIZED
        } else {
            folder
        };

        let objects = self.store().list(&folder_prefix(folder)).await?;
        let assets = objects
            .into_iter()
            .filter(|o| !is_placeholder_key(&o.key))
            .filter(|o| split_key(&o.key).0 == folder)
            .map(|o| {
                VideoAsset::from_object(&o.key, o.size, o.last_modified, self.public_origin())
            })
            .collect();

        Ok(assets)
    }

    /// List the Recycle Bin with each entry's decoded original location.
    ///
    /// Objects placed under the prefix out of band decode to nothing;
    /// they are still listed (with their raw name) so the caller can
    /// purge them, just never restored by guesswork.
    pub async fn list_recycle_bin(&self) -> CatalogResult<Vec<RecycleBinEntry>> {
        let objects = self.store().list(&folder_prefix(RECYCLE_BIN)).await?;
        let entries = objects
            .into_iter()
            .filter(|o| !is_placeholder_key(&o.key))
            .map(|o| {
                let source = match decode_recycle_key(&o.key) {
                    Ok(source) => Some(source),
                    Err(e) => {
                        warn!("Undecodable Recycle Bin key {}: {}", o.key, e);
                        None
                    }
                };
                RecycleBinEntry {
                    asset: VideoAsset::from_object(
                        &o.key,
                        o.size,
                        o.last_modified,
                        self.public_origin(),
                    ),
                    source,
                }
            })
            .collect();

        Ok(entries)
    }

    /// Store an uploaded video and return its materialized asset.
    pub async fn upload_video(
        &self,
        folder: &str,
        file_name: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> CatalogResult<VideoAsset> {
        if file_name.trim().is_empty() {
            return Err(CatalogError::validation("File name required"));
        }
        if file_name.contains('/') {
            return Err(CatalogError::validation(format!(
                "File name may not contain '/': {}",
                file_name
            )));
        }
        if folder == RECYCLE_BIN || folder.starts_with(RECYCLE_BIN_PREFIX) {
            return Err(CatalogError::reserved(RECYCLE_BIN));
        }
        if !folder.is_empty() && folder != UNCATEGORIZED {
            Self::ensure_well_formed_folder(folder)?;
        }

        let key = to_storage_key(folder, file_name);
        let size = data.len() as u64;
        self.store().put_bytes(&key, data, content_type).await?;

        info!("Uploaded {} ({} bytes)", key, size);
        Ok(VideoAsset::from_object(
            &key,
            size,
            Some(chrono::Utc::now()),
            self.public_origin(),
        ))
    }
}
