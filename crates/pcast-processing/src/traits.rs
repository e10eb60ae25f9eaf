//! Core traits for media processing

use async_trait::async_trait;

/// Playback length of an audio file, in whole seconds.
///
/// Object-safe so the episode workflow can hold it as `Arc<dyn DurationProbe>`.
#[async_trait]
pub trait DurationProbe: Send + Sync {
    async fn probe_duration(&self, data: Vec<u8>) -> Result<i32, anyhow::Error>;
}
