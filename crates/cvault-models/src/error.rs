//! Codec error types.

use thiserror::Error;

/// Errors produced when decoding storage keys.
///
/// The codec has no side effects; these only occur on malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathCodecError {
    #[error("Key is not under the Recycle Bin prefix: {0}")]
    NotARecycleKey(String),

    #[error("Recycle Bin key is missing its timestamp or folder field: {0}")]
    MalformedRecycleKey(String),

    #[error("Recycle Bin key has a non-numeric timestamp field: {0}")]
    InvalidTimestamp(String),

    #[error("Recycle Bin key has an empty file name: {0}")]
    EmptyFileName(String),
}
