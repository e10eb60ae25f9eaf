//! Wiring of the PostgreSQL-backed collaborators into the episode editor.

use std::sync::Arc;

use pcast_core::PcastConfig;
use pcast_db::{EpisodeRepository, FileRepository, LogRepository, PodcastRepository};
use pcast_processing::Mp3Processor;
use pcast_services::{EditorSettings, EpisodeEditor, ItunesCategoryResolver};
use pcast_storage::{AttachmentService, FileAreaService, Storage};
use sqlx::PgPool;

use crate::state::AppState;

pub fn build_state(config: PcastConfig, pool: PgPool, storage: Arc<dyn Storage>) -> Arc<AppState> {
    let attachments: Arc<dyn AttachmentService> = Arc::new(FileAreaService::new(
        storage,
        Arc::new(FileRepository::new(pool.clone())),
    ));

    let editor = EpisodeEditor::new(
        Arc::new(PodcastRepository::new(pool.clone())),
        Arc::new(EpisodeRepository::new(pool.clone())),
        Arc::new(LogRepository::new(pool)),
        attachments.clone(),
        Arc::new(ItunesCategoryResolver),
        Arc::new(Mp3Processor::new()),
        EditorSettings::from(&config),
    );

    Arc::new(AppState::new(config, editor, attachments))
}
