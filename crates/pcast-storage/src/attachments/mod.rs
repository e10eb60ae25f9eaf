//! File areas and draft staging.
//!
//! Uploads land in a per-user *draft area* first. Submitting a form commits
//! the draft into the target area (for episodes: `(cmid, "pcast_episode",
//! episode id)`), replacing whatever the target held. File metadata lives in
//! a [`FileIndex`]; the bytes live in a [`crate::Storage`] backend keyed by
//! content hash.

mod error;
mod index;
mod service;
mod types;

pub use error::{AttachmentError, AttachmentResult};
pub use index::{FileIndex, MemoryFileIndex};
pub use service::{AttachmentService, FileAreaService};
pub use types::{AreaOptions, FileArea, FileSort, NewStoredFile, StoredFile, DRAFT_AREA};
