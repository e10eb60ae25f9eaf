//! Identifiers shared between the workflow, the attachment service and the HTTP layer.

/// Module kind recorded in audit events and used as the capability prefix.
pub const MODULE_NAME: &str = "pcast";

/// File area that holds committed episode media.
pub const EPISODE_FILE_AREA: &str = "pcast_episode";

/// Form field carrying the staged upload.
pub const ATTACHMENTS_FIELD: &str = "attachments";

/// Display mode of the view page that lists a single episode.
pub const ADDENTRY_VIEW: &str = "addentry";

/// Audit action for a first save.
pub const ACTION_ADD_EPISODE: &str = "add episode";

/// Audit action for a later save.
pub const ACTION_UPDATE_EPISODE: &str = "update episode";

/// Episode media: one file, no folders.
pub const EPISODE_MAX_FILES: usize = 1;

/// Type groups accepted in the episode file area.
pub const EPISODE_FILE_TYPES: &[&str] = &["audio", "video"];

/// Rich-text format tag for HTML summaries.
pub const FORMAT_HTML: i32 = 1;
