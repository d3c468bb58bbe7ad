//! Object storage backends for ClipVault.
//!
//! This crate provides:
//! - The [`ObjectStore`] trait: the flat key-value capability the rest of
//!   the system is written against (put/get/list/copy/delete, plus
//!   prefix-and-delimiter listing)
//! - [`S3Store`]: AWS S3 / Cloudflare R2 / MinIO via the AWS SDK
//! - [`MemoryStore`]: an in-process implementation with the same
//!   semantics, used by tests and local development

pub mod error;
pub mod memory;
pub mod s3;
pub mod traits;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryStore;
pub use s3::{S3Config, S3Store};
pub use traits::{ObjectInfo, ObjectListing, ObjectStore};
