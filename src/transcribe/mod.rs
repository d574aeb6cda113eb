//! Remote diarized transcription.

pub mod segment;
pub mod service;

pub use segment::Segment;
pub use service::{DiarizationService, MockDiarization, OpenAiDiarization};
