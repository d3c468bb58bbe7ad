//! Recycle Bin key encoding.
//!
//! A soft-deleted object keeps its original location inside its new key:
//!
//! ```text
//! Recycle Bin/{epochMillis}_{folder with '/' -> '_'}_{fileName}
//! ```
//!
//! Decoding splits on the first two underscores only, so file names
//! containing underscores survive the round trip. The folder field itself
//! is a single underscore-delimited field: a nested folder path (whose
//! `/` separators were replaced by `_`) or a folder name containing a
//! literal `_` cannot be distinguished from a longer file name, and the
//! decoder deterministically assigns everything past the second underscore
//! to the file name. This is a known weakness of the on-bucket layout, not
//! something this codec can repair.

use serde::{Deserialize, Serialize};

use crate::error::PathCodecError;
use crate::path::{to_storage_key, RECYCLE_BIN_PREFIX, UNCATEGORIZED};

/// The original location recovered from a Recycle Bin key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecycledSource {
    /// Folder the object lived in before deletion.
    pub folder: String,
    /// File name before deletion.
    pub file_name: String,
    /// When the object was soft-deleted (epoch milliseconds).
    pub deleted_at_millis: i64,
}

impl RecycledSource {
    /// Storage key the object would be restored to.
    pub fn restore_key(&self) -> String {
        to_storage_key(&self.folder, &self.file_name)
    }
}

/// Encode the Recycle Bin key for an object being soft-deleted.
///
/// An empty folder is recorded as `Uncategorized` so the key always has
/// all three fields.
pub fn encode_recycle_key(folder: &str, file_name: &str, epoch_millis: i64) -> String {
    let folder = if folder.is_empty() {
        UNCATEGORIZED
    } else {
        folder
    };
    format!(
        "{}{}_{}_{}",
        RECYCLE_BIN_PREFIX,
        epoch_millis,
        folder.replace('/', "_"),
        file_name
    )
}

/// Decode a Recycle Bin key back into its original location.
///
/// Splits the portion after the prefix into at most three fields on the
/// first two underscores: timestamp, encoded folder, file name. Fails only
/// on malformed input (wrong prefix, missing fields, non-numeric
/// timestamp).
pub fn decode_recycle_key(key: &str) -> Result<RecycledSource, PathCodecError> {
    let encoded = key
        .strip_prefix(RECYCLE_BIN_PREFIX)
        .ok_or_else(|| PathCodecError::NotARecycleKey(key.to_string()))?;

    let mut fields = encoded.splitn(3, '_');
    let timestamp = fields
        .next()
        .ok_or_else(|| PathCodecError::MalformedRecycleKey(key.to_string()))?;
    let folder = fields
        .next()
        .ok_or_else(|| PathCodecError::MalformedRecycleKey(key.to_string()))?;
    let file_name = fields
        .next()
        .ok_or_else(|| PathCodecError::MalformedRecycleKey(key.to_string()))?;

    let deleted_at_millis: i64 = timestamp
        .parse()
        .map_err(|_| PathCodecError::InvalidTimestamp(key.to_string()))?;

    if file_name.is_empty() {
        return Err(PathCodecError::EmptyFileName(key.to_string()));
    }

    Ok(RecycledSource {
        folder: folder.replace('_', "/"),
        file_name: file_name.to_string(),
        deleted_at_millis,
    })
}
