//! Pcast Processing Library
//!
//! Media inspection for uploaded episode files. Only MPEG audio is analysed;
//! other types pass through untouched.

#[cfg(feature = "audio")]
pub mod audio;
pub mod metadata;
pub mod mime;
pub mod traits;

#[cfg(feature = "audio")]
pub use audio::{Mp3Error, Mp3Processor};
pub use metadata::AudioMetadata;
pub use mime::{is_mp3_mime, MP3_MIME_TYPES};
pub use traits::DurationProbe;
