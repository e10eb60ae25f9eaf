//! Episode edit workflow
//!
//! `prepare` answers the form page (GET); `submit` handles a posted form
//! (POST). Both resolve the placement and run the same authorization checks
//! first, so a cancelled submission is refused exactly like a saved one.
//!
//! A save is two sequential writes: the bound episode is inserted or updated,
//! the staged draft is committed to the episode's file area, and a second
//! update stores the duration probed from any MP3 attachment.

pub mod binding;
pub mod links;
pub mod policy;


use std::sync::Arc;
use std::time::Duration;

use pcast_core::constants::{ACTION_ADD_EPISODE, ACTION_UPDATE_EPISODE, MODULE_NAME};
use pcast_core::models::{Episode, EpisodeForm, LogEvent, Placement};
use pcast_core::{AppError, Capability, PcastConfig, RequestContext};
use pcast_db::{AuditLog, EpisodeStore, PodcastStore};
use pcast_processing::{is_mp3_mime, DurationProbe};
use pcast_storage::{AreaOptions, AttachmentService, FileArea, FileSort};
use serde::Serialize;
use validator::Validate;

use crate::categories::CategoryResolver;
use policy::{EditDecision, EditPolicy};

/// Which placement and (optionally) which episode a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditRequest {
    pub cmid: i64,
    pub episode_id: Option<i64>,
}

impl EditRequest {
    /// Build from raw parameters where `0` means absent.
    pub fn new(cmid: i64, episode_id: i64) -> Self {
        Self {
            cmid,
            episode_id: (episode_id != 0).then_some(episode_id),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Submission {
    Cancel,
    Save(EpisodeForm),
}

/// State of the edit form
#[derive(Debug, Clone, Serialize)]
pub struct EditPage {
    pub cmid: i64,
    pub episode_id: Option<i64>,
    /// Podcast name
    pub title: String,
    /// Course full name
    pub heading: String,
    /// Draft area to stage the attachment in
    pub draft_item_id: i64,
    pub max_bytes: u64,
    pub form: EpisodeForm,
}

#[derive(Debug, Clone)]
pub struct EditOutcome {
    /// The re-fetched episode; `None` when the submission was cancelled
    pub episode: Option<Episode>,
    /// Relative link to the view page
    pub redirect: String,
}

#[derive(Debug, Clone)]
pub struct EditorSettings {
    pub max_editing_time: Duration,
    /// Attachment limit when the course sets none
    pub site_max_bytes: u64,
}

impl From<&PcastConfig> for EditorSettings {
    fn from(config: &PcastConfig) -> Self {
        Self {
            max_editing_time: config.max_editing_time,
            site_max_bytes: config.max_attachment_bytes,
        }
    }
}

struct Authorized {
    placement: Placement,
    episode: Option<Episode>,
}

#[derive(Clone)]
pub struct EpisodeEditor {
    podcasts: Arc<dyn PodcastStore>,
    episodes: Arc<dyn EpisodeStore>,
    audit: Arc<dyn AuditLog>,
    attachments: Arc<dyn AttachmentService>,
    categories: Arc<dyn CategoryResolver>,
    duration_probe: Arc<dyn DurationProbe>,
    policy: EditPolicy,
    site_max_bytes: u64,
}

impl EpisodeEditor {
    pub fn new(
        podcasts: Arc<dyn PodcastStore>,
        episodes: Arc<dyn EpisodeStore>,
        audit: Arc<dyn AuditLog>,
        attachments: Arc<dyn AttachmentService>,
        categories: Arc<dyn CategoryResolver>,
        duration_probe: Arc<dyn DurationProbe>,
        settings: EditorSettings,
    ) -> Self {
        Self {
            podcasts,
            episodes,
            audit,
            attachments,
            categories,
            duration_probe,
            policy: EditPolicy::new(settings.max_editing_time),
            site_max_bytes: settings.site_max_bytes,
        }
    }

    /// Form state for creating a new episode or editing an existing one.
    #[tracing::instrument(skip(self, ctx), fields(user_id = ctx.user_id))]
    pub async fn prepare(
        &self,
        ctx: &RequestContext<'_>,
        request: EditRequest,
    ) -> Result<EditPage, AppError> {
        let Authorized { placement, episode } = self.authorize(ctx, request).await?;

        let existing = episode
            .as_ref()
            .and_then(|e| e.id)
            .map(|id| FileArea::episode(placement.cmid(), id));
        let draft_item_id = self
            .attachments
            .prepare_draft_area(ctx.user_id, existing.as_ref())
            .await?;

        let mut form = episode
            .as_ref()
            .map(Episode::to_form)
            .unwrap_or_default();
        form.mediafile = Some(draft_item_id);

        Ok(EditPage {
            cmid: placement.cmid(),
            episode_id: episode.and_then(|e| e.id),
            title: placement.podcast.name.clone(),
            heading: placement.course.fullname.clone(),
            draft_item_id,
            max_bytes: placement.max_attachment_bytes(self.site_max_bytes),
            form,
        })
    }

    /// Handle a posted form.
    #[tracing::instrument(skip(self, ctx, submission), fields(user_id = ctx.user_id))]
    pub async fn submit(
        &self,
        ctx: &RequestContext<'_>,
        request: EditRequest,
        submission: Submission,
    ) -> Result<EditOutcome, AppError> {
        let Authorized { placement, episode } = self.authorize(ctx, request).await?;
        let cmid = placement.cmid();

        let form = match submission {
            Submission::Cancel => {
                let redirect = match request.episode_id {
                    Some(id) => links::entry_link(cmid, id),
                    None => links::module_link(cmid),
                };
                tracing::debug!(cmid, "Episode edit cancelled");
                return Ok(EditOutcome {
                    episode: None,
                    redirect,
                });
            }
            Submission::Save(form) => form,
        };
        form.validate()?;

        let module = placement.context();
        let mut episode = episode.unwrap_or_else(Episode::shell);
        binding::bind_form(&mut episode, form, ctx.now, self.categories.as_ref());
        episode.approved = !placement.podcast.requireapproval
            || ctx.capabilities.can_approve(ctx.user_id, &module);

        let (id, action) = match episode.id {
            None => {
                episode.pcastid = placement.podcast.id;
                episode.course = placement.course.id;
                episode.userid = ctx.user_id;
                episode.timecreated = ctx.now;
                let id = self.episodes.insert_episode(&episode).await?;
                episode.id = Some(id);
                (id, ACTION_ADD_EPISODE)
            }
            Some(id) => {
                self.episodes.update_episode(&episode).await?;
                (id, ACTION_UPDATE_EPISODE)
            }
        };

        let link = links::entry_link(cmid, id);
        self.audit
            .record_event(
                &LogEvent {
                    course_id: placement.course.id,
                    module: MODULE_NAME.to_string(),
                    action: action.to_string(),
                    url: link.clone(),
                    info: id.to_string(),
                    cmid,
                    user_id: ctx.user_id,
                },
                ctx.now,
            )
            .await?;

        let area = FileArea::episode(cmid, id);
        if let Some(draft_id) = episode.mediafile {
            let options = AreaOptions::episode(placement.max_attachment_bytes(self.site_max_bytes));
            self.attachments
                .commit_draft_area(ctx.user_id, draft_id, &area, &options)
                .await?;
        }

        episode.duration = self.probe_duration(&area).await?;
        self.episodes.update_episode(&episode).await?;

        let episode = self
            .episodes
            .get_episode(id)
            .await?
            .ok_or(AppError::EpisodeNotFound { id })?;

        tracing::info!(
            episode_id = id,
            cmid,
            action,
            approved = episode.approved,
            duration = ?episode.duration,
            "Episode saved"
        );

        Ok(EditOutcome {
            episode: Some(episode),
            redirect: link,
        })
    }

    /// Run the submit-time checks without touching any store.
    ///
    /// Callers that stage uploads before calling [`Self::submit`] use this
    /// to refuse the request before any file is written.
    #[tracing::instrument(skip(self, ctx), fields(user_id = ctx.user_id))]
    pub async fn check_submit_access(
        &self,
        ctx: &RequestContext<'_>,
        request: EditRequest,
    ) -> Result<(), AppError> {
        self.authorize(ctx, request).await.map(|_| ())
    }

    /// Resolve the placement, load the episode and apply the edit policy.
    async fn authorize(
        &self,
        ctx: &RequestContext<'_>,
        request: EditRequest,
    ) -> Result<Authorized, AppError> {
        let placement = self.resolve_placement(request.cmid).await?;
        let module = placement.context();

        if !ctx.capabilities.can_write(ctx.user_id, &module) {
            tracing::warn!(
                user_id = ctx.user_id,
                cmid = module.cmid,
                "Write capability missing"
            );
            return Err(AppError::PermissionDenied {
                capability: Capability::Write,
            });
        }

        let Some(id) = request.episode_id else {
            return Ok(Authorized {
                placement,
                episode: None,
            });
        };

        let episode = self
            .episodes
            .get_episode_in_podcast(id, placement.podcast.id)
            .await?
            .ok_or(AppError::EpisodeNotFound { id })?;

        let back_link = links::entry_link(module.cmid, id);
        match self.policy.evaluate(ctx, &module, &episode) {
            EditDecision::Allowed => Ok(Authorized {
                placement,
                episode: Some(episode),
            }),
            EditDecision::NotAuthor => {
                tracing::warn!(
                    user_id = ctx.user_id,
                    episode_id = id,
                    "Edit of another user's episode refused"
                );
                Err(AppError::CannotEditOthers { back_link })
            }
            EditDecision::WindowExpired => {
                tracing::warn!(
                    user_id = ctx.user_id,
                    episode_id = id,
                    "Editing window expired"
                );
                Err(AppError::EditWindowExpired { back_link })
            }
            EditDecision::MissingWrite => Err(AppError::PermissionDenied {
                capability: Capability::Write,
            }),
        }
    }

    async fn resolve_placement(&self, cmid: i64) -> Result<Placement, AppError> {
        if cmid == 0 {
            return Err(AppError::MissingModuleReference);
        }

        let course_module = self
            .podcasts
            .get_course_module(cmid)
            .await?
            .ok_or(AppError::ModuleNotFound(cmid))?;
        let course = self
            .podcasts
            .get_course(course_module.course)
            .await?
            .ok_or(AppError::ModuleNotFound(cmid))?;
        let podcast = self
            .podcasts
            .get_podcast(course_module.instance)
            .await?
            .ok_or(AppError::ModuleNotFound(cmid))?;

        Ok(Placement {
            course_module,
            course,
            podcast,
        })
    }

    /// Duration of the last MP3 in the area, by modification time.
    async fn probe_duration(&self, area: &FileArea) -> Result<Option<i32>, AppError> {
        let files = self
            .attachments
            .list_files(area, FileSort::TimeModified)
            .await?;

        let mut duration = None;
        for file in files.iter().filter(|f| is_mp3_mime(&f.mimetype)) {
            let data = self.attachments.read_by_hash(&file.contenthash).await?;
            match self.duration_probe.probe_duration(data).await {
                Ok(secs) => duration = Some(secs),
                Err(e) => tracing::warn!(
                    error = %e,
                    file_id = file.id,
                    filename = %file.filename,
                    "Could not read MP3 duration"
                ),
            }
        }

        Ok(duration)
    }
}
