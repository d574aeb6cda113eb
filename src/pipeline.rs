//! Episode pipeline orchestration.
//!
//! Drives one episode end-to-end: idempotency check → fetch audio →
//! probe duration → segment → per-chunk transcription → merge → render →
//! persist → catalog update. Episode failures are isolated: they are
//! reported and the batch moves on. Nothing is retried within a run — a
//! later invocation is the retry, guarded by the transcript-presence
//! check.

use crate::audio::probe::probe_duration;
use crate::audio::segmenter::Segmenter;
use crate::audio::toolchain::AudioToolchain;
use crate::catalog::{Catalog, Episode};
use crate::config::Config;
use crate::error::{PodscribeError, Result};
use crate::output;
use crate::store;
use crate::transcribe::service::DiarizationService;
use crate::transcript::merge::TranscriptBuilder;
use crate::transcript::render;
use crate::{fetch, transcript};

/// Counts for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Episodes transcribed in this run.
    pub processed: usize,
    /// Episodes whose transcript already existed.
    pub skipped: usize,
    /// Episodes aborted by an episode-scoped failure.
    pub failed: usize,
}

/// Outcome of a single episode run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EpisodeOutcome {
    Processed,
    Skipped,
}

/// Sequential batch orchestrator.
///
/// All tunables travel in the explicit [`Config`]; the toolchain and
/// service seams take fakes in tests.
pub struct Orchestrator<'a> {
    config: &'a Config,
    toolchain: &'a dyn AudioToolchain,
    service: &'a dyn DiarizationService,
    http: reqwest::Client,
    quiet: bool,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        config: &'a Config,
        toolchain: &'a dyn AudioToolchain,
        service: &'a dyn DiarizationService,
    ) -> Self {
        Self {
            config,
            toolchain,
            service,
            http: reqwest::Client::new(),
            quiet: false,
        }
    }

    /// Suppress progress output (failures and the summary still print).
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Run the pipeline over every catalog episode, one at a time.
    ///
    /// `filter` restricts the run to the listed episode numbers; episodes
    /// outside the filter are not counted at all.
    pub async fn run_batch(&self, catalog: &mut Catalog, filter: &[u32]) -> BatchSummary {
        let episodes: Vec<Episode> = catalog.episodes().to_vec();
        let mut summary = BatchSummary::default();

        for episode in episodes {
            if !filter.is_empty() && !filter.contains(&episode.number) {
                continue;
            }

            if !self.quiet {
                output::episode_banner(episode.number, &episode.title);
            }

            match self.run_episode(&episode).await {
                Ok(outcome) => {
                    // Both paths leave a transcript on disk; make sure the
                    // catalog points at it (a no-op when already recorded).
                    if let Err(e) =
                        catalog.update_transcript_ref(episode.number, &episode.transcript_ref())
                    {
                        output::episode_failure(episode.number, "catalog update", &e);
                        summary.failed += 1;
                        continue;
                    }
                    match outcome {
                        EpisodeOutcome::Processed => {
                            if !self.quiet {
                                output::success("Transcribed with speaker diarization");
                            }
                            summary.processed += 1;
                        }
                        EpisodeOutcome::Skipped => {
                            if !self.quiet {
                                output::notice("Transcript already exists, skipping");
                            }
                            summary.skipped += 1;
                        }
                    }
                }
                Err(e) => {
                    output::episode_failure(episode.number, stage_of(&e), &e);
                    summary.failed += 1;
                }
            }
        }

        summary
    }

    /// Run the pipeline for one episode.
    async fn run_episode(&self, episode: &Episode) -> Result<EpisodeOutcome> {
        let transcript_dir = &self.config.paths.transcript_dir;
        if store::transcript_exists(transcript_dir, episode) {
            return Ok(EpisodeOutcome::Skipped);
        }

        let audio_path = fetch::ensure_audio(
            &self.http,
            episode,
            &self.config.paths.audio_dir,
            !self.quiet,
        )
        .await?;

        let total_secs = probe_duration(&audio_path, self.toolchain)?;
        let segmenter = Segmenter::new(
            self.toolchain,
            &audio_path,
            total_secs,
            self.config.chunking.max_chunk_secs,
        );
        if !self.quiet {
            output::stage(&format!(
                "Source duration {} ({} chunk(s) of up to {}s)",
                transcript::format_timestamp(total_secs),
                segmenter.chunk_count(),
                self.config.chunking.max_chunk_secs,
            ));
        }

        let mut builder = TranscriptBuilder::new();
        for (index, chunk) in segmenter.enumerate() {
            let chunk = chunk?;
            let offset = chunk.offset;
            if !self.quiet {
                output::stage(&format!(
                    "Transcribing chunk {index} at {}",
                    transcript::format_timestamp(offset)
                ));
            }
            let segments = self.service.transcribe(chunk.payload).await.map_err(|e| {
                PodscribeError::TranscriptionFailed {
                    offset,
                    message: e.to_string(),
                }
            })?;
            builder.push_chunk(index, offset, segments);
        }

        if builder.segment_count() == 0 {
            return Err(PodscribeError::EmptyTranscript {
                episode: episode.number,
            });
        }

        let text = render::render(&builder.finish());
        store::write_transcript(transcript_dir, episode, &text)?;
        Ok(EpisodeOutcome::Processed)
    }
}

/// Name the pipeline stage an error belongs to, for failure reporting.
fn stage_of(error: &PodscribeError) -> &'static str {
    match error {
        PodscribeError::DownloadFailed { .. } => "audio download",
        PodscribeError::EncoderMissing { .. } | PodscribeError::DurationUnavailable { .. } => {
            "duration probe"
        }
        PodscribeError::ChunkExtractionFailed { .. } => "chunk extraction",
        PodscribeError::TranscriptionFailed { .. } => "transcription",
        PodscribeError::EmptyTranscript { .. } => "merge",
        PodscribeError::CatalogRead { .. } | PodscribeError::CatalogWrite { .. } => {
            "catalog update"
        }
        _ => "pipeline",
    }
}
