use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Audio metadata extracted from file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioMetadata {
    pub duration: Duration,
    /// Audio bitrate in kbps
    pub bitrate: Option<u32>,
    pub sample_rate: Option<u32>,
    pub channels: Option<u8>,
}

impl AudioMetadata {
    /// Duration rounded to the nearest second, saturating at `i32::MAX`.
    pub fn duration_secs(&self) -> i32 {
        let secs = (self.duration.as_millis() + 500) / 1000;
        i32::try_from(secs).unwrap_or(i32::MAX)
    }
}
