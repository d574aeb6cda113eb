//! Episode catalog: the local record of known episodes.
//!
//! The catalog is a JSON file standing in for the podcast feed. It also
//! serves as the metadata store: once a transcript is persisted, the
//! episode's record gains a reference path to it.

use crate::error::{PodscribeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One episode as recorded in the catalog.
///
/// Immutable during a run except for the transcript reference, which is
/// written back after a successful transcription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Episode {
    pub number: u32,
    pub title: String,
    pub guid: String,
    pub audio_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
}

impl Episode {
    /// URL-safe slug derived from the title, with any leading
    /// `Episode <n>:` / `<n>:` prefix removed.
    pub fn slug(&self) -> String {
        slugify(strip_number_prefix(&self.title))
    }

    /// Filename for the downloaded source audio.
    pub fn audio_filename(&self) -> String {
        format!("episode-{:03}-{}.mp3", self.number, self.slug())
    }

    /// Filename for the rendered transcript artifact.
    pub fn transcript_filename(&self) -> String {
        format!("episode-{}.txt", self.number)
    }

    /// Reference path recorded in the catalog once the transcript exists.
    pub fn transcript_ref(&self) -> String {
        format!(
            "{}/{}",
            crate::defaults::TRANSCRIPT_REF_PREFIX,
            self.transcript_filename()
        )
    }
}

/// Remove a leading `Episode <n>:` or `<n>:` title prefix.
///
/// Only strips when the colon form is actually present; otherwise the
/// title is returned untouched.
fn strip_number_prefix(title: &str) -> &str {
    let trimmed = title.trim();
    let mut rest = trimmed;
    if let Some(prefix) = rest.get(..8)
        && prefix.eq_ignore_ascii_case("episode ")
    {
        rest = rest[8..].trim_start();
    }
    let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0
        && let Some(after) = rest[digits..].strip_prefix(':')
    {
        return after.trim_start();
    }
    trimmed
}

/// Lowercase, keep alphanumerics, collapse everything else into single dashes.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// The episode catalog file.
#[derive(Debug, Clone)]
pub struct Catalog {
    path: PathBuf,
    episodes: Vec<Episode>,
}

impl Catalog {
    /// Load the catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| PodscribeError::CatalogRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let episodes: Vec<Episode> =
            serde_json::from_str(&contents).map_err(|e| PodscribeError::CatalogRead {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            episodes,
        })
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// Record the transcript reference for an episode.
    ///
    /// Idempotent: when the stored reference already equals `reference`,
    /// the file is not rewritten. Returns whether a write happened.
    pub fn update_transcript_ref(&mut self, number: u32, reference: &str) -> Result<bool> {
        let episode = self
            .episodes
            .iter_mut()
            .find(|e| e.number == number)
            .ok_or_else(|| PodscribeError::Other(format!("Episode {number} not in catalog")))?;

        if episode.transcript.as_deref() == Some(reference) {
            return Ok(false);
        }

        episode.transcript = Some(reference.to_string());
        self.save()?;
        Ok(true)
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.episodes).map_err(|e| {
            PodscribeError::CatalogWrite {
                path: self.path.display().to_string(),
                message: e.to_string(),
            }
        })?;
        fs::write(&self.path, json).map_err(|e| PodscribeError::CatalogWrite {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }
}
