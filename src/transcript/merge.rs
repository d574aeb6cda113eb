//! Merge engine for per-chunk diarized segments.
//!
//! Accumulates chunk results into one tagged stream of boundary markers and
//! offset-translated segments, then groups consecutive same-speaker
//! segments into blocks:
//! - Marker insertion: every chunk contributes a boundary marker before its
//!   first segment, even when it produced no segments.
//! - Ordering: chunks arrive in ascending offset order and each chunk's
//!   segments are already time-ordered, so append order is non-decreasing;
//!   a final stable sort guards against out-of-order service responses.
//! - Grouping: speaker labels are chunk-local tokens, so a run never
//!   crosses a marker — the same label on both sides of a boundary still
//!   yields two blocks.

use crate::transcribe::segment::Segment;

/// A segment translated to source-absolute time.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalSegment {
    pub speaker: String,
    pub text: String,
    pub start: f64,
    pub end: f64,
}

/// One entry of the tagged merge stream.
#[derive(Debug, Clone)]
enum MergeEntry {
    /// Chunk boundary: terminates any in-progress speaker run.
    Marker { index: usize, offset: f64 },
    Segment(GlobalSegment),
}

impl MergeEntry {
    /// Sort key. A marker carries its chunk's offset, which is never after
    /// the chunk's own segments, so a stable sort keeps it in front of them.
    fn start(&self) -> f64 {
        match self {
            MergeEntry::Marker { offset, .. } => *offset,
            MergeEntry::Segment(segment) => segment.start,
        }
    }
}

/// A maximal run of consecutive same-speaker segments, merged into one
/// text span with the start time of its first segment.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptBlock {
    pub speaker: String,
    pub start: f64,
    pub text: String,
}

/// One line of the final transcript, in render order.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptLine {
    Marker { index: usize, offset: f64 },
    Block(TranscriptBlock),
}

/// Accumulates per-chunk segment lists and produces the ordered transcript.
#[derive(Debug, Default)]
pub struct TranscriptBuilder {
    entries: Vec<MergeEntry>,
    segment_count: usize,
}

impl TranscriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one chunk's results.
    ///
    /// Chunks must be pushed in ascending offset order. Segment times are
    /// chunk-relative and are translated here.
    pub fn push_chunk(&mut self, index: usize, offset: f64, segments: Vec<Segment>) {
        self.entries.push(MergeEntry::Marker { index, offset });
        for segment in segments {
            self.entries.push(MergeEntry::Segment(GlobalSegment {
                speaker: segment.speaker,
                text: segment.text,
                start: segment.start + offset,
                end: segment.end + offset,
            }));
            self.segment_count += 1;
        }
    }

    /// Total number of segments across all pushed chunks.
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Sort, group, and emit the transcript lines.
    pub fn finish(mut self) -> Vec<TranscriptLine> {
        // Stable by construction order for equal keys, so markers stay
        // ahead of their own chunk's segments.
        self.entries.sort_by(|a, b| a.start().total_cmp(&b.start()));

        let mut lines = Vec::new();
        let mut run: Option<SpeakerRun> = None;

        for entry in self.entries {
            match entry {
                MergeEntry::Marker { index, offset } => {
                    if let Some(run) = run.take() {
                        lines.push(TranscriptLine::Block(run.into_block()));
                    }
                    lines.push(TranscriptLine::Marker { index, offset });
                }
                MergeEntry::Segment(segment) => match &mut run {
                    Some(current) if current.speaker == segment.speaker => {
                        current.texts.push(segment.text);
                    }
                    _ => {
                        if let Some(run) = run.take() {
                            lines.push(TranscriptLine::Block(run.into_block()));
                        }
                        run = Some(SpeakerRun {
                            speaker: segment.speaker,
                            start: segment.start,
                            texts: vec![segment.text],
                        });
                    }
                },
            }
        }

        if let Some(run) = run.take() {
            lines.push(TranscriptLine::Block(run.into_block()));
        }

        lines
    }
}

/// In-progress speaker run during the grouping scan.
struct SpeakerRun {
    speaker: String,
    start: f64,
    texts: Vec<String>,
}

impl SpeakerRun {
    fn into_block(self) -> TranscriptBlock {
        TranscriptBlock {
            speaker: self.speaker,
            start: self.start,
            text: self.texts.join(" "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(speaker: &str, text: &str, start: f64, end: f64) -> Segment {
        Segment::new(speaker, text, start, end)
    }

    fn blocks(lines: &[TranscriptLine]) -> Vec<&TranscriptBlock> {
        lines
            .iter()
            .filter_map(|l| match l {
                TranscriptLine::Block(b) => Some(b),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn groups_consecutive_same_speaker_segments() {
        let mut builder = TranscriptBuilder::new();
        builder.push_chunk(
            0,
            0.0,
            vec![
                seg("A", "hi", 0.0, 1.0),
                seg("A", "there", 1.0, 2.0),
                seg("B", "ok", 2.0, 3.0),
            ],
        );
        let lines = builder.finish();

        let blocks = blocks(&lines);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].speaker, "A");
        assert_eq!(blocks[0].text, "hi there");
        assert_eq!(blocks[0].start, 0.0);
        assert_eq!(blocks[1].speaker, "B");
        assert_eq!(blocks[1].text, "ok");
        assert_eq!(blocks[1].start, 2.0);
    }

    #[test]
    fn offsets_translate_to_source_absolute_time() {
        let mut builder = TranscriptBuilder::new();
        builder.push_chunk(0, 0.0, vec![seg("A", "one", 0.0, 5.0)]);
        builder.push_chunk(1, 1200.0, vec![seg("B", "two", 3.5, 8.0)]);
        let lines = builder.finish();

        let blocks = blocks(&lines);
        assert_eq!(blocks[0].start, 0.0);
        assert_eq!(blocks[1].start, 1203.5);
    }

    #[test]
    fn same_speaker_token_does_not_group_across_chunks() {
        let mut builder = TranscriptBuilder::new();
        builder.push_chunk(0, 0.0, vec![seg("A", "end", 0.0, 5.0)]);
        builder.push_chunk(1, 1200.0, vec![seg("A", "start", 0.0, 5.0)]);
        let lines = builder.finish();

        // Two separate blocks for speaker A with the chunk-1 marker between.
        assert_eq!(lines.len(), 4);
        assert!(matches!(
            lines[0],
            TranscriptLine::Marker { index: 0, offset } if offset == 0.0
        ));
        assert!(matches!(&lines[1], TranscriptLine::Block(b) if b.text == "end"));
        assert!(matches!(
            lines[2],
            TranscriptLine::Marker { index: 1, offset } if offset == 1200.0
        ));
        assert!(matches!(&lines[3], TranscriptLine::Block(b) if b.text == "start"));
    }

    #[test]
    fn empty_chunk_still_emits_marker() {
        let mut builder = TranscriptBuilder::new();
        builder.push_chunk(0, 0.0, vec![seg("A", "only", 0.0, 2.0)]);
        builder.push_chunk(1, 1200.0, Vec::new());
        let lines = builder.finish();

        assert_eq!(lines.len(), 3);
        assert!(matches!(
            lines[2],
            TranscriptLine::Marker { index: 1, offset } if offset == 1200.0
        ));
        assert_eq!(blocks(&lines).len(), 1);
    }

    #[test]
    fn marker_flushes_run_even_when_next_chunk_is_empty() {
        let mut builder = TranscriptBuilder::new();
        builder.push_chunk(0, 0.0, vec![seg("A", "tail", 1190.0, 1199.0)]);
        builder.push_chunk(1, 1200.0, Vec::new());
        builder.push_chunk(2, 2400.0, vec![seg("A", "head", 0.0, 1.0)]);
        let lines = builder.finish();

        let blocks = blocks(&lines);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, "tail");
        assert_eq!(blocks[1].text, "head");
    }

    #[test]
    fn out_of_order_segments_are_sorted_by_start() {
        let mut builder = TranscriptBuilder::new();
        // Service returned segments out of order within the chunk.
        builder.push_chunk(
            0,
            0.0,
            vec![
                seg("B", "second", 5.0, 6.0),
                seg("A", "first", 1.0, 2.0),
            ],
        );
        let lines = builder.finish();

        let blocks = blocks(&lines);
        assert_eq!(blocks[0].speaker, "A");
        assert_eq!(blocks[1].speaker, "B");
    }

    #[test]
    fn sort_reunites_split_speaker_run() {
        let mut builder = TranscriptBuilder::new();
        // Out-of-order arrival hid a contiguous A-run; after the sort the
        // two A segments are adjacent again and group into one block.
        builder.push_chunk(
            0,
            0.0,
            vec![
                seg("A", "hello", 0.0, 1.0),
                seg("B", "later", 7.0, 8.0),
                seg("A", "again", 1.0, 2.0),
            ],
        );
        let lines = builder.finish();

        let blocks = blocks(&lines);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, "hello again");
        assert_eq!(blocks[1].text, "later");
    }

    #[test]
    fn segment_count_tracks_all_chunks() {
        let mut builder = TranscriptBuilder::new();
        assert_eq!(builder.segment_count(), 0);
        builder.push_chunk(0, 0.0, vec![seg("A", "x", 0.0, 1.0)]);
        builder.push_chunk(1, 1200.0, Vec::new());
        builder.push_chunk(2, 2400.0, vec![seg("A", "y", 0.0, 1.0)]);
        assert_eq!(builder.segment_count(), 2);
    }

    #[test]
    fn merge_is_deterministic() {
        let build = || {
            let mut builder = TranscriptBuilder::new();
            builder.push_chunk(
                0,
                0.0,
                vec![seg("A", "a", 0.0, 1.0), seg("B", "b", 1.0, 2.0)],
            );
            builder.push_chunk(1, 1200.0, vec![seg("A", "c", 0.0, 1.0)]);
            builder.finish()
        };
        assert_eq!(build(), build());
    }
}
