use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use pcast_core::models::Episode;
use pcast_core::AppError;
use tokio::sync::RwLock;

use crate::traits::EpisodeStore;

#[derive(Default)]
struct State {
    episodes: BTreeMap<i64, Episode>,
    next_id: i64,
    writes: usize,
}

#[derive(Clone, Default)]
pub struct MemoryEpisodeStore {
    state: Arc<RwLock<State>>,
}

impl MemoryEpisodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an episode with a fixed id. Not counted as a write.
    pub async fn put_episode(&self, episode: Episode) -> i64 {
        let mut state = self.state.write().await;
        let id = match episode.id {
            Some(id) => id,
            None => state.next_id + 1,
        };
        state.next_id = state.next_id.max(id);
        state.episodes.insert(
            id,
            Episode {
                id: Some(id),
                ..episode
            },
        );
        id
    }

    /// Inserts plus updates performed through the store trait
    pub async fn write_count(&self) -> usize {
        self.state.read().await.writes
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.episodes.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.episodes.is_empty()
    }
}

#[async_trait]
impl EpisodeStore for MemoryEpisodeStore {
    async fn get_episode(&self, id: i64) -> Result<Option<Episode>, AppError> {
        Ok(self.state.read().await.episodes.get(&id).cloned())
    }

    async fn get_episode_in_podcast(
        &self,
        id: i64,
        pcastid: i64,
    ) -> Result<Option<Episode>, AppError> {
        Ok(self
            .state
            .read()
            .await
            .episodes
            .get(&id)
            .filter(|e| e.pcastid == pcastid)
            .cloned())
    }

    async fn insert_episode(&self, episode: &Episode) -> Result<i64, AppError> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        state.writes += 1;
        let id = state.next_id;
        state.episodes.insert(
            id,
            Episode {
                id: Some(id),
                ..episode.clone()
            },
        );
        Ok(id)
    }

    async fn update_episode(&self, episode: &Episode) -> Result<(), AppError> {
        let id = episode
            .id
            .ok_or_else(|| AppError::Internal("Cannot update an episode without id".to_string()))?;
        let mut state = self.state.write().await;
        let stored = state
            .episodes
            .get_mut(&id)
            .ok_or(AppError::EpisodeNotFound { id })?;

        // Same column set as the SQL repository: placement, owner and
        // creation time stay as first written.
        stored.name = episode.name.clone();
        stored.summary = episode.summary.clone();
        stored.subtitle = episode.subtitle.clone();
        stored.keywords = episode.keywords.clone();
        stored.explicit = episode.explicit;
        stored.category = episode.category;
        stored.topcategory = episode.topcategory;
        stored.nestedcategory = episode.nestedcategory;
        stored.timemodified = episode.timemodified;
        stored.approved = episode.approved;
        stored.duration = episode.duration;
        stored.mediafile = episode.mediafile;
        state.writes += 1;
        Ok(())
    }
}
