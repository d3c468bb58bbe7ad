//! Catalog error types.

use cvault_models::PathCodecError;
use cvault_storage::StorageError;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors surfaced by catalog operations.
///
/// Multi-step operations abort on the first failing step. The two
/// `Partial*` variants distinguish a failure after a copy landed (a
/// duplicate now exists) from a clean pre-mutation failure, and report
/// how far a folder rename got before stopping; reconciliation is left
/// to the caller.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("A required field is missing or invalid: {0}")]
    Validation(String),

    #[error("'{0}' is a reserved folder and cannot be modified")]
    ReservedFolder(String),

    #[error("Folder already exists: {0}")]
    FolderAlreadyExists(String),

    #[error("Folder '{0}' contains videos; move or delete them first")]
    FolderNotEmpty(String),

    #[error("Video is already in the target folder")]
    NoOpMove,

    #[error("An object already exists at the destination: {0}")]
    DestinationConflict(String),

    #[error("New name is required")]
    NewNameRequired,

    #[error("Only Recycle Bin entries can be restored or purged: {0}")]
    NotInRecycleBin(String),

    #[error("Operation partially applied: object exists at both '{original}' and '{duplicate}': {source}")]
    PartialApplication {
        original: String,
        duplicate: String,
        source: StorageError,
    },

    #[error("Folder rename partially applied: {completed} of {total} objects moved: {source}")]
    PartialRename {
        completed: usize,
        total: usize,
        source: StorageError,
    },

    #[error("Key codec error: {0}")]
    Codec(#[from] PathCodecError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CatalogError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn reserved(folder: impl Into<String>) -> Self {
        Self::ReservedFolder(folder.into())
    }

    /// Stable machine-checkable kind, carried alongside the human message
    /// on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::Validation(_) => "validation",
            CatalogError::ReservedFolder(_) => "reserved_folder",
            CatalogError::FolderAlreadyExists(_) => "folder_exists",
            CatalogError::FolderNotEmpty(_) => "folder_not_empty",
            CatalogError::NoOpMove => "no_op_move",
            CatalogError::DestinationConflict(_) => "destination_conflict",
            CatalogError::NewNameRequired => "new_name_required",
            CatalogError::NotInRecycleBin(_) => "not_in_recycle_bin",
            CatalogError::PartialApplication { .. } => "partial_application",
            CatalogError::PartialRename { .. } => "partial_rename",
            CatalogError::Codec(_) => "malformed_key",
            CatalogError::Storage(StorageError::NotFound(_)) => "not_found",
            CatalogError::Storage(_) => "storage_error",
        }
    }
}
