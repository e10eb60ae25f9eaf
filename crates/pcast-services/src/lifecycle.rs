//! Module lifecycle hooks
//!
//! Entry points the host platform calls when a podcast instance is created,
//! edited or removed, plus the reporting, grading and maintenance hooks every
//! module must answer.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pcast_core::models::{Course, NewPodcast, Placement, PodcastForm, PodcastUpdate};
use pcast_core::AppError;
use pcast_db::PodcastStore;
use serde::Serialize;
use validator::Validate;

/// Activity summary for user reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserOutline {
    /// Unix time of the last activity, 0 when there is none
    pub time: i64,
    pub info: String,
}

#[derive(Clone)]
pub struct InstanceHooks {
    podcasts: Arc<dyn PodcastStore>,
}

impl InstanceHooks {
    pub fn new(podcasts: Arc<dyn PodcastStore>) -> Self {
        Self { podcasts }
    }

    /// Create an instance from the settings form and return its id.
    #[tracing::instrument(skip(self, form), fields(course = form.course))]
    pub async fn add_instance(
        &self,
        form: &PodcastForm,
        now: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        form.validate()?;

        let id = self
            .podcasts
            .insert_podcast(&NewPodcast {
                course: form.course,
                name: form.name.clone(),
                intro: form.intro.clone(),
                timecreated: now,
                requireapproval: form.requireapproval,
                grade: form.grade,
            })
            .await?;

        tracing::info!(podcast_id = id, "Podcast instance added");
        Ok(id)
    }

    /// Update the instance named by the form's `instance` field.
    #[tracing::instrument(skip(self, form), fields(instance = ?form.instance))]
    pub async fn update_instance(
        &self,
        form: &PodcastForm,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        form.validate()?;
        let id = form.instance.ok_or_else(|| {
            AppError::InvalidInput("An instance id is required to update a podcast".to_string())
        })?;

        self.podcasts
            .update_podcast(&PodcastUpdate {
                id,
                course: form.course,
                name: form.name.clone(),
                intro: form.intro.clone(),
                timemodified: now,
                requireapproval: form.requireapproval,
                grade: form.grade,
            })
            .await
    }

    /// Delete an instance. Returns false when it does not exist.
    // TODO: remove the instance's episodes and their file areas once the
    // episode store exposes a bulk delete.
    #[tracing::instrument(skip(self))]
    pub async fn delete_instance(&self, id: i64) -> Result<bool, AppError> {
        if self.podcasts.get_podcast(id).await?.is_none() {
            return Ok(false);
        }
        self.podcasts.delete_podcast(id).await?;
        tracing::info!(podcast_id = id, "Podcast instance deleted");
        Ok(true)
    }

    pub fn user_outline(&self, _placement: &Placement, _user_id: i64) -> UserOutline {
        UserOutline {
            time: 0,
            info: String::new(),
        }
    }

    pub fn user_complete(&self, _placement: &Placement, _user_id: i64) -> bool {
        true
    }

    /// Whether anything was reported; this module has nothing to report.
    pub fn print_recent_activity(
        &self,
        _course: &Course,
        _viewer_is_teacher: bool,
        _since: DateTime<Utc>,
    ) -> bool {
        false
    }

    pub fn get_participants(&self, _podcast_id: i64) -> Option<Vec<i64>> {
        None
    }

    pub fn scale_used(&self, _podcast_id: i64, _scale_id: i64) -> bool {
        false
    }

    /// True iff `scale_id` is non-zero and some podcast is graded with it.
    pub async fn scale_used_anywhere(&self, scale_id: i64) -> Result<bool, AppError> {
        if scale_id == 0 {
            return Ok(false);
        }
        self.podcasts.scale_in_use(scale_id).await
    }

    pub fn cron(&self) -> bool {
        true
    }

    pub fn uninstall(&self) -> bool {
        true
    }
}
