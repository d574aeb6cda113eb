//! Audio segmentation into time-bounded chunks.
//!
//! Splits a source file into sequential, non-overlapping chunks no longer
//! than the configured maximum. Chunks are materialized lazily: each call
//! to `next()` invokes the encoder once and captures the encoded stream
//! in memory. Nothing is written to disk.

use crate::audio::toolchain::AudioToolchain;
use crate::error::Result;
use std::path::Path;

/// One extracted chunk of the source audio.
///
/// Consumed immediately by the transcription client; never persisted.
#[derive(Debug, Clone)]
pub struct AudioChunk {
    /// Start of this chunk within the source, in seconds.
    pub offset: f64,
    /// Chunk duration in seconds. The final chunk may be shorter than the
    /// configured maximum.
    pub length: f64,
    /// Encoded audio bytes.
    pub payload: Vec<u8>,
}

/// Lazy iterator of chunks covering `[0, total_secs)` exactly once.
///
/// An extraction failure yields the error and ends the iteration; the
/// caller aborts the episode (partial transcripts are never persisted).
pub struct Segmenter<'a> {
    toolchain: &'a dyn AudioToolchain,
    path: &'a Path,
    total_secs: f64,
    max_chunk_secs: f64,
    cursor: f64,
}

impl<'a> Segmenter<'a> {
    pub fn new(
        toolchain: &'a dyn AudioToolchain,
        path: &'a Path,
        total_secs: f64,
        max_chunk_secs: f64,
    ) -> Self {
        debug_assert!(max_chunk_secs > 0.0, "chunk length must be positive");
        Self {
            toolchain,
            path,
            total_secs,
            max_chunk_secs,
            cursor: 0.0,
        }
    }

    /// Number of chunks this segmenter will produce.
    pub fn chunk_count(&self) -> usize {
        if self.total_secs <= 0.0 {
            return 0;
        }
        (self.total_secs / self.max_chunk_secs).ceil() as usize
    }
}

impl Iterator for Segmenter<'_> {
    type Item = Result<AudioChunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.total_secs {
            return None;
        }

        let offset = self.cursor;
        let remaining = self.total_secs - offset;
        let length = self.max_chunk_secs.min(remaining);
        if length <= 0.0 {
            return None;
        }
        self.cursor += length;

        match self.toolchain.extract(self.path, offset, length) {
            Ok(payload) => Some(Ok(AudioChunk {
                offset,
                length,
                payload,
            })),
            Err(e) => {
                // Stop after the first failure; the episode is aborted.
                self.cursor = self.total_secs;
                Some(Err(e))
            }
        }
    }
}
