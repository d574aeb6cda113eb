//! Diarized segment types and response normalization.

use crate::defaults;
use serde::Deserialize;

/// One speaker-attributed span, times relative to the chunk it came from.
///
/// The speaker label is a chunk-local token assigned by the service; the
/// same token in two different chunks does not denote the same person.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub speaker: String,
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl Segment {
    pub fn new(speaker: &str, text: &str, start: f64, end: f64) -> Self {
        Self {
            speaker: speaker.to_string(),
            text: text.to_string(),
            start,
            end,
        }
    }
}

/// Segment as it appears on the wire, before normalization.
///
/// Every field is optional; the service occasionally omits any of them.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireSegment {
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub end: Option<f64>,
}

/// Normalize wire segments into well-formed [`Segment`]s.
///
/// Missing speaker labels become the `Unknown` sentinel, missing times
/// become 0.0, and text is trimmed. Segments whose text is empty after
/// trimming carry no information and would corrupt speaker-run grouping,
/// so they are dropped here.
pub(crate) fn normalize(raw: Vec<WireSegment>) -> Vec<Segment> {
    raw.into_iter()
        .filter_map(|wire| {
            let text = wire.text.unwrap_or_default();
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(Segment {
                speaker: wire
                    .speaker
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| defaults::UNKNOWN_SPEAKER.to_string()),
                text: text.to_string(),
                start: wire.start.unwrap_or(0.0),
                end: wire.end.unwrap_or(0.0),
            })
        })
        .collect()
}
