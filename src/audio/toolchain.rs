//! External encoder invocation with testable command execution.
//!
//! Two operations are needed from the encoder:
//! - Info mode: diagnostic output used as a duration fallback
//! - Extract mode: cut a time-bounded chunk and capture the encoded stream
//!
//! The `AudioToolchain` trait enables full testability without ffmpeg installed.

use crate::error::{PodscribeError, Result};
use std::path::Path;
use std::process::Command;
use std::sync::Mutex;

/// Trait for invoking the external audio encoder.
///
/// Object-safe, Send + Sync for use in concurrent contexts.
/// Enables testability by allowing mock implementations.
pub trait AudioToolchain: Send + Sync {
    /// Run the encoder in info mode and return its diagnostic output.
    ///
    /// The output is free-form text; callers parse what they need from it.
    fn media_info(&self, path: &Path) -> Result<String>;

    /// Extract `length` seconds of audio starting at `offset` and return the
    /// re-encoded byte stream.
    fn extract(&self, path: &Path, offset: f64, length: f64) -> Result<Vec<u8>>;
}

/// Production toolchain shelling out to ffmpeg.
#[derive(Debug, Clone)]
pub struct FfmpegToolchain {
    binary: String,
    bitrate: String,
}

impl FfmpegToolchain {
    pub fn new(binary: impl Into<String>, bitrate: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            bitrate: bitrate.into(),
        }
    }

    fn map_spawn_error(&self, e: std::io::Error) -> PodscribeError {
        if e.kind() == std::io::ErrorKind::NotFound {
            PodscribeError::EncoderMissing {
                tool: self.binary.clone(),
            }
        } else {
            PodscribeError::Other(format!("Failed to execute {}: {}", self.binary, e))
        }
    }
}

impl Default for FfmpegToolchain {
    fn default() -> Self {
        Self::new(crate::defaults::ENCODER_BIN, crate::defaults::CHUNK_BITRATE)
    }
}

impl AudioToolchain for FfmpegToolchain {
    fn media_info(&self, path: &Path) -> Result<String> {
        // ffmpeg prints stream info to stderr and exits non-zero when no
        // output file is given; the exit status is not meaningful here.
        let output = Command::new(&self.binary)
            .arg("-i")
            .arg(path)
            .output()
            .map_err(|e| self.map_spawn_error(e))?;

        Ok(String::from_utf8_lossy(&output.stderr).to_string())
    }

    fn extract(&self, path: &Path, offset: f64, length: f64) -> Result<Vec<u8>> {
        let output = Command::new(&self.binary)
            .arg("-ss")
            .arg(offset.to_string())
            .arg("-t")
            .arg(length.to_string())
            .arg("-i")
            .arg(path)
            .args(["-vn", "-acodec", "libmp3lame", "-b:a"])
            .arg(&self.bitrate)
            .args(["-f", "mp3", "pipe:1"])
            .output()
            .map_err(|e| match self.map_spawn_error(e) {
                missing @ PodscribeError::EncoderMissing { .. } => missing,
                other => PodscribeError::ChunkExtractionFailed {
                    offset,
                    message: other.to_string(),
                },
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PodscribeError::ChunkExtractionFailed {
                offset,
                message: format!(
                    "{} exited with status {:?}: {}",
                    self.binary,
                    output.status,
                    truncate(&stderr, 200)
                ),
            });
        }

        Ok(output.stdout)
    }
}

/// Clip diagnostic text to a reasonable length for error messages.
fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Mock toolchain for testing.
///
/// Returns canned info text and payloads, records every extract call, and
/// can be configured to fail at a specific offset.
#[derive(Debug, Default)]
pub struct MockToolchain {
    info: String,
    payload: Vec<u8>,
    fail_at: Option<f64>,
    extract_calls: Mutex<Vec<(f64, f64)>>,
}

impl MockToolchain {
    pub fn new() -> Self {
        Self {
            info: String::new(),
            payload: vec![0u8; 16],
            fail_at: None,
            extract_calls: Mutex::new(Vec::new()),
        }
    }

    /// Configure the diagnostic text returned by `media_info`.
    pub fn with_info(mut self, info: &str) -> Self {
        self.info = info.to_string();
        self
    }

    /// Configure the payload returned for every extracted chunk.
    pub fn with_payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    /// Configure extraction to fail for the chunk starting at `offset`.
    pub fn with_failure_at(mut self, offset: f64) -> Self {
        self.fail_at = Some(offset);
        self
    }

    /// The `(offset, length)` pairs of every extract call so far.
    pub fn extract_calls(&self) -> Vec<(f64, f64)> {
        self.extract_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl AudioToolchain for MockToolchain {
    fn media_info(&self, _path: &Path) -> Result<String> {
        Ok(self.info.clone())
    }

    fn extract(&self, _path: &Path, offset: f64, length: f64) -> Result<Vec<u8>> {
        if let Ok(mut calls) = self.extract_calls.lock() {
            calls.push((offset, length));
        }
        if let Some(fail_at) = self.fail_at
            && (offset - fail_at).abs() < 1e-6
        {
            return Err(PodscribeError::ChunkExtractionFailed {
                offset,
                message: "mock extraction failure".to_string(),
            });
        }
        Ok(self.payload.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_toolchain_returns_configured_info() {
        let toolchain = MockToolchain::new().with_info("Duration: 00:10:00.00");
        let info = toolchain.media_info(Path::new("ep.mp3")).unwrap();
        assert_eq!(info, "Duration: 00:10:00.00");
    }

    #[test]
    fn mock_toolchain_records_extract_calls() {
        let toolchain = MockToolchain::new();
        toolchain.extract(Path::new("ep.mp3"), 0.0, 1200.0).unwrap();
        toolchain
            .extract(Path::new("ep.mp3"), 1200.0, 300.0)
            .unwrap();
        assert_eq!(toolchain.extract_calls(), vec![(0.0, 1200.0), (1200.0, 300.0)]);
    }

    #[test]
    fn mock_toolchain_fails_at_configured_offset() {
        let toolchain = MockToolchain::new().with_failure_at(1200.0);
        assert!(toolchain.extract(Path::new("ep.mp3"), 0.0, 1200.0).is_ok());
        let err = toolchain
            .extract(Path::new("ep.mp3"), 1200.0, 600.0)
            .unwrap_err();
        match err {
            PodscribeError::ChunkExtractionFailed { offset, .. } => {
                assert_eq!(offset, 1200.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn truncate_clips_long_text() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ab", 3), "ab");
    }
}
