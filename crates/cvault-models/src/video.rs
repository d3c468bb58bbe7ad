//! Video asset projections.
//!
//! A `VideoAsset` is a view over one stored object, materialized on every
//! listing call. It is never persisted independently of the object it
//! describes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::path::{public_url, split_key};
use crate::recycle::RecycledSource;

/// One stored video, decorated for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoAsset {
    /// Storage key (the sole addressing primitive).
    pub key: String,
    /// Display name: the final path segment of the key.
    pub name: String,
    /// Object size in bytes.
    pub size: u64,
    /// Last modified time, when the store reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    /// Logical folder the key lives in.
    pub folder: String,
    /// Public content-delivery URL derived from the key.
    pub url: String,
}

impl VideoAsset {
    /// Materialize an asset from a listed object.
    pub fn from_object(
        key: &str,
        size: u64,
        last_modified: Option<DateTime<Utc>>,
        origin: &str,
    ) -> Self {
        let (folder, name) = split_key(key);
        Self {
            key: key.to_string(),
            name,
            size,
            last_modified,
            folder,
            url: public_url(origin, key),
        }
    }
}

/// A soft-deleted asset, with its decoded original location when the
/// Recycle Bin key is well formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecycleBinEntry {
    #[serde(flatten)]
    pub asset: VideoAsset,
    /// Original folder/name recovered from the key. Absent for objects
    /// placed under the Recycle Bin prefix out of band.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<RecycledSource>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_derives_folder_name_and_url() {
        let asset =
            VideoAsset::from_object("Trips/2024/clip.mp4", 1024, None, "https://cdn.example.com");
        assert_eq!(asset.name, "clip.mp4");
        assert_eq!(asset.folder, "Trips/2024");
        assert_eq!(asset.url, "https://cdn.example.com/Trips/2024/clip.mp4");
    }

    #[test]
    fn root_asset_lands_in_uncategorized() {
        let asset = VideoAsset::from_object("clip.mp4", 0, None, "https://cdn.example.com");
        assert_eq!(asset.folder, "Uncategorized");
        assert_eq!(asset.name, "clip.mp4");
    }

    #[test]
    fn wire_names_are_camel_case() {
        let asset = VideoAsset::from_object("clip.mp4", 7, Some(Utc::now()), "https://c.example");
        let json = serde_json::to_value(&asset).unwrap();
        assert!(json.get("lastModified").is_some());
        assert!(json.get("last_modified").is_none());
    }
}
