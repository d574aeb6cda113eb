//! Transcript artifact persistence.
//!
//! A transcript is written once, from a complete in-memory string, so no
//! other run can observe a partial file. Presence of the artifact is the
//! idempotency signal for the whole episode pipeline.

use crate::catalog::Episode;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Path of the transcript artifact for an episode.
pub fn transcript_path(transcript_dir: &Path, episode: &Episode) -> PathBuf {
    transcript_dir.join(episode.transcript_filename())
}

/// Whether the episode's transcript artifact already exists.
pub fn transcript_exists(transcript_dir: &Path, episode: &Episode) -> bool {
    transcript_path(transcript_dir, episode).exists()
}

/// Persist a rendered transcript with a single write call.
pub fn write_transcript(transcript_dir: &Path, episode: &Episode, text: &str) -> Result<PathBuf> {
    fs::create_dir_all(transcript_dir)?;
    let path = transcript_path(transcript_dir, episode);
    fs::write(&path, text)?;
    Ok(path)
}
