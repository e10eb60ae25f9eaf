//! Application state shared by every handler.

use std::sync::Arc;

use pcast_core::PcastConfig;
use pcast_services::EpisodeEditor;
use pcast_storage::AttachmentService;

use crate::auth::JwtService;

#[derive(Clone)]
pub struct AppState {
    pub config: PcastConfig,
    pub editor: EpisodeEditor,
    /// Used directly by the submit handler to stage an uploaded file
    pub attachments: Arc<dyn AttachmentService>,
    pub jwt: JwtService,
}

impl AppState {
    pub fn new(
        config: PcastConfig,
        editor: EpisodeEditor,
        attachments: Arc<dyn AttachmentService>,
    ) -> Self {
        let jwt = JwtService::new(&config.jwt_secret);
        Self {
            config,
            editor,
            attachments,
            jwt,
        }
    }

    /// Absolute location of a page given relative to the module's pages.
    pub fn view_url(&self, relative: &str) -> String {
        format!(
            "{}/{}",
            self.config.view_base_path.trim_end_matches('/'),
            relative
        )
    }
}
