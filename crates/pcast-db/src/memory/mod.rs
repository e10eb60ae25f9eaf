//! In-memory stores
//!
//! Used by tests and by the API when no database is configured. Each store
//! is cheap to clone and shares its state between clones.

mod audit;
mod episode;
mod podcast;

pub use audit::MemoryAuditLog;
pub use episode::MemoryEpisodeStore;
pub use podcast::MemoryPodcastStore;
