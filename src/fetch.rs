//! Episode audio download.
//!
//! Fetches an episode's source audio into the audio directory when it is
//! not already present. Downloads stream to disk; a failed download is
//! removed so a later run retries from scratch.

use crate::catalog::Episode;
use crate::error::{PodscribeError, Result};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Ensure the episode's audio file exists locally, downloading if needed.
pub async fn ensure_audio(
    client: &reqwest::Client,
    episode: &Episode,
    audio_dir: &Path,
    progress: bool,
) -> Result<PathBuf> {
    let path = audio_dir.join(episode.audio_filename());
    if path.exists() {
        return Ok(path);
    }

    fs::create_dir_all(audio_dir)?;
    download_to_path(client, &episode.audio_url, &path, progress).await?;
    Ok(path)
}

/// Core download: fetch url, stream to path, remove partial file on failure.
async fn download_to_path(
    client: &reqwest::Client,
    url: &str,
    output_path: &Path,
    progress: bool,
) -> Result<()> {
    let failed = |message: String| PodscribeError::DownloadFailed {
        url: url.to_string(),
        message,
    };

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| failed(format!("request failed: {e}")))?;

    if !response.status().is_success() {
        return Err(failed(format!("HTTP {}", response.status())));
    }

    let total_size = response.content_length().unwrap_or(0);

    // Set up progress bar
    let pb = if progress {
        let pb = ProgressBar::new(total_size);
        pb.set_style(
            // SAFETY: hardcoded template string — always valid
            #[allow(clippy::expect_used)]
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                .expect("hardcoded progress bar template")
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut stream = response.bytes_stream();
    let mut file = fs::File::create(output_path)?;

    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                drop(file);
                remove_partial(output_path);
                return Err(failed(format!("read failed mid-stream: {e}")));
            }
        };

        if let Err(e) = file.write_all(&chunk) {
            drop(file);
            remove_partial(output_path);
            return Err(failed(format!("write failed: {e}")));
        }

        if let Some(ref pb) = pb {
            pb.inc(chunk.len() as u64);
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    Ok(())
}

/// Remove a partially written download, reporting but not propagating failure.
fn remove_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        eprintln!("podscribe: failed to remove partial download: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn episode_with_audio(dir: &Path) -> Episode {
        let episode = Episode {
            number: 3,
            title: "Three".to_string(),
            guid: "g3".to_string(),
            audio_url: "https://example.invalid/3.mp3".to_string(),
            transcript: None,
        };
        fs::write(dir.join(episode.audio_filename()), b"mp3").unwrap();
        episode
    }

    #[tokio::test]
    async fn existing_audio_is_not_redownloaded() {
        let dir = TempDir::new().unwrap();
        let episode = episode_with_audio(dir.path());

        // The URL is unresolvable, so reaching the network would fail;
        // a present file must short-circuit before any request.
        let client = reqwest::Client::new();
        let path = ensure_audio(&client, &episode, dir.path(), false)
            .await
            .unwrap();
        assert_eq!(path, dir.path().join("episode-003-three.mp3"));
    }

    #[tokio::test]
    async fn unresolvable_url_reports_download_failure() {
        let dir = TempDir::new().unwrap();
        let episode = Episode {
            number: 4,
            title: "Four".to_string(),
            guid: "g4".to_string(),
            audio_url: "http://nonexistent.invalid/4.mp3".to_string(),
            transcript: None,
        };

        let client = reqwest::Client::new();
        let err = ensure_audio(&client, &episode, dir.path(), false)
            .await
            .unwrap_err();
        assert!(matches!(err, PodscribeError::DownloadFailed { .. }));
    }
}
