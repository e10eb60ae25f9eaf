//! MPEG audio inspection.
//!
//! Parsing is synchronous and proportional to file size, so the async entry
//! points hand it to the blocking pool.

use std::io::Cursor;

use async_trait::async_trait;
use lofty::config::ParseOptions;
use lofty::error::LoftyError;
use lofty::file::FileType;
use lofty::prelude::*;
use lofty::probe::Probe;
use thiserror::Error;

use crate::metadata::AudioMetadata;
use crate::traits::DurationProbe;

#[derive(Debug, Error)]
pub enum Mp3Error {
    #[error("Could not read MPEG audio: {0}")]
    Unreadable(#[from] LoftyError),

    #[error("No MPEG audio frames found")]
    NoAudioFrames,

    #[error("Duration extraction was interrupted: {0}")]
    Interrupted(String),
}

/// Reads MPEG audio properties (duration, bitrate, sample rate, channels).
#[derive(Debug, Clone, Copy, Default)]
pub struct Mp3Processor;

impl Mp3Processor {
    pub fn new() -> Self {
        Self
    }

    /// Read the stream properties synchronously.
    pub fn read_metadata(data: &[u8]) -> Result<AudioMetadata, Mp3Error> {
        let tagged_file = Probe::new(Cursor::new(data))
            .set_file_type(FileType::Mpeg)
            .options(ParseOptions::new())
            .read()?;

        let properties = tagged_file.properties();
        if properties.sample_rate().is_none() {
            return Err(Mp3Error::NoAudioFrames);
        }

        let metadata = AudioMetadata {
            duration: properties.duration(),
            bitrate: properties.audio_bitrate(),
            sample_rate: properties.sample_rate(),
            channels: properties.channels(),
        };

        tracing::debug!(
            size = data.len(),
            duration_ms = metadata.duration.as_millis() as u64,
            bitrate = ?metadata.bitrate,
            sample_rate = ?metadata.sample_rate,
            "MPEG audio properties read"
        );

        Ok(metadata)
    }

    async fn read_owned(data: Vec<u8>) -> Result<AudioMetadata, Mp3Error> {
        tokio::task::spawn_blocking(move || Self::read_metadata(&data))
            .await
            .map_err(|e| Mp3Error::Interrupted(e.to_string()))?
    }
}

#[async_trait]
impl DurationProbe for Mp3Processor {
    async fn probe_duration(&self, data: Vec<u8>) -> Result<i32, anyhow::Error> {
        Ok(Self::read_owned(data).await?.duration_secs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// MPEG-1 Layer III, 128 kbps, 48 kHz, no padding: 384-byte frames of
    /// 1152 samples (24 ms each).
    fn cbr_stream(frames: usize) -> Vec<u8> {
        const FRAME_LEN: usize = 384;
        let mut data = Vec::with_capacity(frames * FRAME_LEN);
        for _ in 0..frames {
            let mut frame = vec![0u8; FRAME_LEN];
            frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x94, 0x00]);
            data.extend_from_slice(&frame);
        }
        data
    }

    #[tokio::test]
    async fn test_cbr_duration() {
        // 5208 frames * 24 ms = 124.992 s
        let secs = Mp3Processor::new()
            .probe_duration(cbr_stream(5208))
            .await
            .unwrap();
        assert!((124..=126).contains(&secs), "got {secs}");
    }

    #[test]
    fn test_read_metadata_reports_stream_properties() {
        let meta = Mp3Processor::read_metadata(&cbr_stream(250)).unwrap();
        assert_eq!(meta.sample_rate, Some(48_000));
        assert!(meta.duration.as_secs() >= 5);
    }

    #[tokio::test]
    async fn test_garbage_is_rejected() {
        let processor = Mp3Processor::new();
        assert!(processor.probe_duration(vec![0u8; 4096]).await.is_err());
        assert!(Mp3Processor::read_metadata(b"definitely not audio").is_err());
    }
}
