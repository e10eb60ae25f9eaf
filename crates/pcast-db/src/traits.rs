//! Store abstractions
//!
//! These traits define the minimal interface the workflow needs from the
//! record store, allowing it to run against PostgreSQL or in-memory maps.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pcast_core::models::{
    Course, CourseModule, Episode, LogEvent, NewPodcast, Podcast, PodcastUpdate,
};
use pcast_core::AppError;

/// Podcast instances plus the course and placement records they hang off
#[async_trait]
pub trait PodcastStore: Send + Sync {
    async fn get_course_module(&self, cmid: i64) -> Result<Option<CourseModule>, AppError>;

    async fn get_course(&self, id: i64) -> Result<Option<Course>, AppError>;

    async fn get_podcast(&self, id: i64) -> Result<Option<Podcast>, AppError>;

    /// Insert a podcast and return its id
    async fn insert_podcast(&self, podcast: &NewPodcast) -> Result<i64, AppError>;

    /// Returns false when no podcast with that id exists
    async fn update_podcast(&self, podcast: &PodcastUpdate) -> Result<bool, AppError>;

    /// Returns false when no podcast with that id exists
    async fn delete_podcast(&self, id: i64) -> Result<bool, AppError>;

    /// Whether any podcast is graded with the given scale
    async fn scale_in_use(&self, scale_id: i64) -> Result<bool, AppError>;
}

#[async_trait]
pub trait EpisodeStore: Send + Sync {
    async fn get_episode(&self, id: i64) -> Result<Option<Episode>, AppError>;

    /// Episode `id`, only if it belongs to podcast `pcastid`
    async fn get_episode_in_podcast(
        &self,
        id: i64,
        pcastid: i64,
    ) -> Result<Option<Episode>, AppError>;

    /// Insert a new episode and return its id. `episode.id` is ignored.
    async fn insert_episode(&self, episode: &Episode) -> Result<i64, AppError>;

    /// Write the mutable fields of an existing episode. Ownership, placement
    /// and creation time are never touched.
    async fn update_episode(&self, episode: &Episode) -> Result<(), AppError>;
}

#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn record_event(&self, event: &LogEvent, at: DateTime<Utc>) -> Result<(), AppError>;
}
