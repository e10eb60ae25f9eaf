use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use pcast_core::models::{Course, CourseModule, NewPodcast, Podcast, PodcastUpdate};
use pcast_core::AppError;
use tokio::sync::RwLock;

use crate::traits::PodcastStore;

#[derive(Default)]
struct State {
    courses: BTreeMap<i64, Course>,
    course_modules: BTreeMap<i64, CourseModule>,
    podcasts: BTreeMap<i64, Podcast>,
    next_podcast_id: i64,
}

#[derive(Clone, Default)]
pub struct MemoryPodcastStore {
    state: Arc<RwLock<State>>,
}

impl MemoryPodcastStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put_course(&self, course: Course) {
        self.state.write().await.courses.insert(course.id, course);
    }

    pub async fn put_course_module(&self, cm: CourseModule) {
        self.state.write().await.course_modules.insert(cm.id, cm);
    }

    /// Insert or replace a podcast with a fixed id
    pub async fn put_podcast(&self, podcast: Podcast) {
        let mut state = self.state.write().await;
        state.next_podcast_id = state.next_podcast_id.max(podcast.id);
        state.podcasts.insert(podcast.id, podcast);
    }
}

#[async_trait]
impl PodcastStore for MemoryPodcastStore {
    async fn get_course_module(&self, cmid: i64) -> Result<Option<CourseModule>, AppError> {
        Ok(self.state.read().await.course_modules.get(&cmid).copied())
    }

    async fn get_course(&self, id: i64) -> Result<Option<Course>, AppError> {
        Ok(self.state.read().await.courses.get(&id).cloned())
    }

    async fn get_podcast(&self, id: i64) -> Result<Option<Podcast>, AppError> {
        Ok(self.state.read().await.podcasts.get(&id).cloned())
    }

    async fn insert_podcast(&self, podcast: &NewPodcast) -> Result<i64, AppError> {
        let mut state = self.state.write().await;
        state.next_podcast_id += 1;
        let id = state.next_podcast_id;
        state.podcasts.insert(
            id,
            Podcast {
                id,
                course: podcast.course,
                name: podcast.name.clone(),
                intro: podcast.intro.clone(),
                timecreated: podcast.timecreated,
                timemodified: None,
                requireapproval: podcast.requireapproval,
                grade: podcast.grade,
            },
        );
        Ok(id)
    }

    async fn update_podcast(&self, update: &PodcastUpdate) -> Result<bool, AppError> {
        let mut state = self.state.write().await;
        let Some(podcast) = state.podcasts.get_mut(&update.id) else {
            return Ok(false);
        };
        podcast.course = update.course;
        podcast.name = update.name.clone();
        podcast.intro = update.intro.clone();
        podcast.timemodified = Some(update.timemodified);
        podcast.requireapproval = update.requireapproval;
        podcast.grade = update.grade;
        Ok(true)
    }

    async fn delete_podcast(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.state.write().await.podcasts.remove(&id).is_some())
    }

    async fn scale_in_use(&self, scale_id: i64) -> Result<bool, AppError> {
        Ok(self
            .state
            .read()
            .await
            .podcasts
            .values()
            .any(|p| i64::from(p.grade) == -scale_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_podcast(grade: i32) -> NewPodcast {
        NewPodcast {
            course: 2,
            name: "Weekly".to_string(),
            intro: String::new(),
            timecreated: Utc::now(),
            requireapproval: false,
            grade,
        }
    }

    #[tokio::test]
    async fn test_insert_update_delete() {
        let store = MemoryPodcastStore::new();
        let id = store.insert_podcast(&new_podcast(0)).await.unwrap();

        let updated = store
            .update_podcast(&PodcastUpdate {
                id,
                course: 2,
                name: "Daily".to_string(),
                intro: "news".to_string(),
                timemodified: Utc::now(),
                requireapproval: true,
                grade: 0,
            })
            .await
            .unwrap();
        assert!(updated);

        let podcast = store.get_podcast(id).await.unwrap().unwrap();
        assert_eq!(podcast.name, "Daily");
        assert!(podcast.requireapproval);
        assert!(podcast.timemodified.is_some());

        assert!(store.delete_podcast(id).await.unwrap());
        assert!(!store.delete_podcast(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_scale_in_use() {
        let store = MemoryPodcastStore::new();
        store.insert_podcast(&new_podcast(-7)).await.unwrap();
        assert!(store.scale_in_use(7).await.unwrap());
        assert!(!store.scale_in_use(8).await.unwrap());
    }

    #[tokio::test]
    async fn test_put_podcast_keeps_ids_unique() {
        let store = MemoryPodcastStore::new();
        store
            .put_podcast(Podcast {
                id: 10,
                course: 2,
                name: "Seeded".to_string(),
                intro: String::new(),
                timecreated: Utc::now(),
                timemodified: None,
                requireapproval: false,
                grade: 0,
            })
            .await;
        let id = store.insert_podcast(&new_podcast(0)).await.unwrap();
        assert_eq!(id, 11);
    }
}
