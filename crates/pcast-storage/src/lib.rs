//! Pcast Storage Library
//!
//! Blob storage backends and the attachment service built on top of them.
//!
//! # Storage key format
//!
//! Blobs are content-addressed: a file whose SHA-256 digest is `abcdef…` is
//! stored under `filedir/ab/cd/abcdef…`. Identical uploads share one blob no
//! matter how many file areas reference it. Key generation is centralized in
//! the `keys` module so all backends stay consistent.

pub mod attachments;
pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use attachments::{
    AreaOptions, AttachmentError, AttachmentResult, AttachmentService, FileArea, FileAreaService,
    FileIndex, FileSort, MemoryFileIndex, NewStoredFile, StoredFile,
};
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use memory::MemoryStorage;
pub use pcast_core::StorageBackend;
pub use traits::{Storage, StorageError, StorageResult};
