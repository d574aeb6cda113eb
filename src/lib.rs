//! podscribe - Chunked speaker-diarized transcription for podcast archives
//!
//! Splits long episodes into bounded chunks with an external encoder,
//! transcribes each chunk through a remote diarization service, and merges
//! the results into one time-ordered, speaker-attributed transcript.

// Enforce error handling discipline
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod audio;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod diagnostics;
pub mod error;
pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod store;
pub mod transcribe;
pub mod transcript;

// Core seams (toolchain → service → merge)
pub use audio::probe::probe_duration;
pub use audio::segmenter::{AudioChunk, Segmenter};
pub use audio::toolchain::{AudioToolchain, FfmpegToolchain, MockToolchain};
pub use transcribe::segment::Segment;
pub use transcribe::service::{DiarizationService, MockDiarization, OpenAiDiarization};
pub use transcript::merge::{TranscriptBlock, TranscriptBuilder, TranscriptLine};
pub use transcript::render::{format_timestamp, render};

// Pipeline
pub use pipeline::{BatchSummary, Orchestrator};

// Error handling
pub use error::{PodscribeError, Result};

// Config
pub use config::{Config, resolve_api_key};

// Catalog
pub use catalog::{Catalog, Episode};

/// Build version string with optional git commit hash.
///
/// Returns `"0.0.1+abc1234"` when git hash is available, `"0.0.1"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_starts_with_cargo_version() {
        let ver = version_string();
        assert!(
            ver.starts_with(env!("CARGO_PKG_VERSION")),
            "version_string should start with CARGO_PKG_VERSION, got: {}",
            ver
        );
    }
}
