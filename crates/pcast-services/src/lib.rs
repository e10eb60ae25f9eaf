//! Pcast Services Layer
//!
//! Business logic of the podcast module: the episode edit workflow and the
//! lifecycle hooks the host platform calls. Collaborators are injected as
//! trait objects; keep HTTP concerns in pcast-api.

pub mod categories;
pub mod episode;
pub mod lifecycle;

pub use categories::{CategoryResolver, CategorySelection, ItunesCategoryResolver};
pub use episode::{
    EditOutcome, EditPage, EditRequest, EditorSettings, EpisodeEditor, Submission,
};
pub use lifecycle::{InstanceHooks, UserOutline};
