//! Data models for the podcast module
//!
//! Each sub-module represents one persisted record kind or the form data that
//! binds to it.

mod course;
mod episode;
mod log;
mod podcast;

// Re-export all models for convenient imports
pub use course::*;
pub use episode::*;
pub use log::*;
pub use podcast::*;
