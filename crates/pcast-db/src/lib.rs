//! Pcast Database Layer
//!
//! Record-store traits used by the episode workflow and the lifecycle hooks,
//! with PostgreSQL repositories and in-memory implementations.

pub mod db;
pub mod memory;
pub mod traits;

// Re-exports: store traits
pub use traits::{AuditLog, EpisodeStore, PodcastStore};

// Re-exports: PostgreSQL repositories
#[cfg(feature = "storage")]
pub use db::FileRepository;
pub use db::{EpisodeRepository, LogRepository, PodcastRepository};

// Re-exports: in-memory stores
pub use memory::{MemoryAuditLog, MemoryEpisodeStore, MemoryPodcastStore};
