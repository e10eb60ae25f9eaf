//! PostgreSQL repositories
//!
//! Each repository owns a `PgPool` clone and implements one of the store
//! traits with runtime-checked `sqlx` queries.

pub mod episode;
#[cfg(feature = "storage")]
pub mod file;
pub mod log;
pub mod podcast;

pub use episode::EpisodeRepository;
#[cfg(feature = "storage")]
pub use file::FileRepository;
pub use log::LogRepository;
pub use podcast::PodcastRepository;
