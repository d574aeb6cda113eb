//! Default configuration constants for podscribe.
//!
//! This module provides shared constants used across different configuration types
//! to ensure consistency and eliminate duplication.

/// Default maximum chunk duration in seconds.
///
/// The diarization service rejects uploads longer than ~1400 seconds.
/// 1200s (20 minutes) keeps every chunk comfortably under that ceiling
/// while minimizing the number of boundary cuts per episode.
pub const MAX_CHUNK_SECS: f64 = 1200.0;

/// Default diarization model identifier.
pub const DEFAULT_MODEL: &str = "gpt-4o-transcribe-diarize";

/// Default API base URL for the transcription service.
pub const API_BASE: &str = "https://api.openai.com/v1";

/// Environment variable consulted for the API key before `.credentials`.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Name of the credentials file searched in the working directory.
pub const CREDENTIALS_FILE: &str = ".credentials";

/// Audio bitrate passed to the encoder when cutting chunks.
///
/// 128k MP3 is well above what speech models need; re-encoding at a fixed
/// bitrate keeps chunk sizes predictable regardless of the source encoding.
pub const CHUNK_BITRATE: &str = "128k";

/// Name of the external encoder binary.
pub const ENCODER_BIN: &str = "ffmpeg";

/// Default directory for downloaded episode audio.
pub const AUDIO_DIR: &str = "episode_audio";

/// Default directory for rendered transcripts.
pub const TRANSCRIPT_DIR: &str = "transcripts";

/// Default episode catalog filename.
pub const CATALOG_FILE: &str = "episodes.json";

/// Speaker token used when the service omits a speaker label.
pub const UNKNOWN_SPEAKER: &str = "Unknown";

/// Reference path prefix recorded in the catalog for a persisted transcript.
pub const TRANSCRIPT_REF_PREFIX: &str = "/transcripts";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_length_stays_under_service_ceiling() {
        // The service rejects chunks over ~1400s; keep a real margin.
        assert!(MAX_CHUNK_SECS <= 1300.0);
        assert!(MAX_CHUNK_SECS > 0.0);
    }
}
