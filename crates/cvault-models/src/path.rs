//! Logical folder path / storage key codec.
//!
//! The bucket has no native directories: a key like `Trips/2024/clip.mp4`
//! is read as folder path `Trips/2024` plus file name `clip.mp4`. Two
//! folder names are reserved and never stored as real prefixes of user
//! intent: `Uncategorized` (the bucket root) and `Recycle Bin` (soft-deleted
//! objects). Folder existence is materialized with zero-byte `.keep`
//! placeholder objects.

/// Synthetic folder for objects whose key has no `/`.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Reserved top-level folder holding soft-deleted objects.
pub const RECYCLE_BIN: &str = "Recycle Bin";

/// Key prefix of everything in the Recycle Bin.
pub const RECYCLE_BIN_PREFIX: &str = "Recycle Bin/";

/// File name of the zero-byte folder placeholder object.
pub const FOLDER_PLACEHOLDER: &str = ".keep";

/// File extensions treated as video content when deciding whether a folder
/// is empty enough to delete.
const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "webm", "mov", "avi", "mkv"];

/// True for the two reserved folder names that can never be created,
/// renamed, or deleted by a caller.
///
/// Every mutating folder operation consults this one guard rather than
/// repeating ad hoc checks.
pub fn is_reserved_folder(path: &str) -> bool {
    path == UNCATEGORIZED || path == RECYCLE_BIN
}

/// Build the storage key for a file in a logical folder.
///
/// `Uncategorized` (and the empty string) map to the bucket root, so the
/// key is the bare file name.
pub fn to_storage_key(folder: &str, file_name: &str) -> String {
    if folder.is_empty() || folder == UNCATEGORIZED {
        file_name.to_string()
    } else {
        format!("{}/{}", folder, file_name)
    }
}

/// Split a storage key into `(folder, file_name)`.
///
/// The folder is every segment before the last `/`, or `Uncategorized`
/// for single-segment keys. Inverse of [`to_storage_key`] except for the
/// documented collapse of the empty folder into `Uncategorized`.
pub fn split_key(key: &str) -> (String, String) {
    match key.rsplit_once('/') {
        Some((folder, name)) => (folder.to_string(), name.to_string()),
        None => (UNCATEGORIZED.to_string(), key.to_string()),
    }
}

/// Final path segment of a key.
pub fn file_name(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// Listing prefix for a logical folder: empty for `Uncategorized`
/// (list everything, filter afterwards), `folder/` otherwise.
pub fn folder_prefix(folder: &str) -> String {
    if folder.is_empty() || folder == UNCATEGORIZED {
        String::new()
    } else {
        format!("{}/", folder)
    }
}

/// Derive the public content-delivery URL for a key.
///
/// Each path segment is percent-encoded individually so `/` separators
/// survive, matching how the delivery origin resolves object keys.
pub fn public_url(origin: &str, key: &str) -> String {
    let encoded: Vec<String> = key
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("{}/{}", origin.trim_end_matches('/'), encoded.join("/"))
}

/// True when the key's extension identifies video content.
pub fn is_video_key(key: &str) -> bool {
    match key.rsplit_once('.') {
        Some((_, ext)) => VIDEO_EXTENSIONS
            .iter()
            .any(|v| ext.eq_ignore_ascii_case(v)),
        None => false,
    }
}

/// True for directory markers and `.keep` placeholders, which listings
/// must never surface as videos.
pub fn is_placeholder_key(key: &str) -> bool {
    key.ends_with('/') || file_name(key) == FOLDER_PLACEHOLDER || file_name(key).is_empty()
}
