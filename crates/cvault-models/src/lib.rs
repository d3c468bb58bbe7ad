//! Shared data models for the ClipVault backend.
//!
//! This crate provides:
//! - The logical folder path / storage key codec
//! - Recycle Bin key encoding and decoding
//! - The `VideoAsset` projection returned by listing endpoints
//!
//! Everything here is pure and store-agnostic; the bucket itself is the
//! only durable state in the system.

pub mod error;
pub mod path;
pub mod recycle;
pub mod video;

// Re-export common types
pub use error::PathCodecError;
pub use path::{
    file_name, folder_prefix, is_placeholder_key, is_reserved_folder, is_video_key, public_url,
    split_key, to_storage_key, FOLDER_PLACEHOLDER, RECYCLE_BIN, RECYCLE_BIN_PREFIX, UNCATEGORIZED,
};
pub use recycle::{decode_recycle_key, encode_recycle_key, RecycledSource};
pub use video::{RecycleBinEntry, VideoAsset};
