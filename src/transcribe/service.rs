//! Diarization service client.
//!
//! This trait allows swapping implementations (real API vs mock).

use crate::error::{PodscribeError, Result};
use crate::transcribe::segment::{self, Segment, WireSegment};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Mutex;

/// Trait for diarized speech-to-text over one chunk of encoded audio.
///
/// Times in the returned segments are relative to the submitted chunk;
/// the caller translates them to source-absolute time. Implementations
/// return `Ok(vec![])` for a well-formed response with no segments — only
/// transport, status, and decode problems are errors. Errors carry no
/// chunk offset; the caller attaches it.
#[async_trait]
pub trait DiarizationService: Send + Sync {
    /// Transcribe one chunk's encoded bytes into diarized segments.
    async fn transcribe(&self, audio: Vec<u8>) -> Result<Vec<Segment>>;

    /// Get the name of the configured model
    fn model_name(&self) -> &str;
}

/// Response envelope from the transcription endpoint.
#[derive(Debug, Deserialize)]
struct DiarizedResponse {
    #[serde(default)]
    segments: Vec<WireSegment>,
}

/// Production client for the OpenAI diarized transcription endpoint.
pub struct OpenAiDiarization {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl OpenAiDiarization {
    pub fn new(api_base: &str, api_key: &str, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl DiarizationService for OpenAiDiarization {
    async fn transcribe(&self, audio: Vec<u8>) -> Result<Vec<Segment>> {
        let part = reqwest::multipart::Part::bytes(audio)
            .file_name("chunk.mp3")
            .mime_str("audio/mpeg")
            .map_err(|e| PodscribeError::Other(format!("Invalid upload mime type: {e}")))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("response_format", "diarized_json")
            .text("chunking_strategy", "auto");

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.api_base))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| PodscribeError::Other(format!("Transcription request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            return Err(PodscribeError::Other(format!(
                "Transcription service returned HTTP {status}: {body}"
            )));
        }

        let diarized: DiarizedResponse = response
            .json()
            .await
            .map_err(|e| PodscribeError::Other(format!("Failed to parse diarized response: {e}")))?;

        Ok(segment::normalize(diarized.segments))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Mock diarization service for testing.
///
/// Returns queued per-call responses in order; once the queue is drained,
/// further calls return no segments. Records the number of calls made.
#[derive(Debug, Default)]
pub struct MockDiarization {
    responses: Mutex<Vec<Vec<Segment>>>,
    calls: Mutex<usize>,
    should_fail: bool,
}

impl MockDiarization {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the segment list returned by the next unanswered call.
    pub fn with_response(self, segments: Vec<Segment>) -> Self {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push(segments);
        }
        self
    }

    /// Configure every call to fail.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Number of transcribe calls made against this mock.
    pub fn calls(&self) -> usize {
        self.calls.lock().map(|c| *c).unwrap_or(0)
    }
}

#[async_trait]
impl DiarizationService for MockDiarization {
    async fn transcribe(&self, _audio: Vec<u8>) -> Result<Vec<Segment>> {
        if let Ok(mut calls) = self.calls.lock() {
            *calls += 1;
        }
        if self.should_fail {
            return Err(PodscribeError::Other(
                "mock transcription failure".to_string(),
            ));
        }
        let mut responses = self
            .responses
            .lock()
            .map_err(|_| PodscribeError::Other("mock lock poisoned".to_string()))?;
        if responses.is_empty() {
            Ok(Vec::new())
        } else {
            Ok(responses.remove(0))
        }
    }

    fn model_name(&self) -> &str {
        "mock-diarize"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_returns_queued_responses_in_order() {
        let service = MockDiarization::new()
            .with_response(vec![Segment::new("A", "first", 0.0, 1.0)])
            .with_response(vec![Segment::new("B", "second", 0.0, 1.0)]);

        let first = service.transcribe(vec![1]).await.unwrap();
        assert_eq!(first[0].text, "first");
        let second = service.transcribe(vec![2]).await.unwrap();
        assert_eq!(second[0].speaker, "B");

        // Drained queue yields empty results, not errors.
        let third = service.transcribe(vec![3]).await.unwrap();
        assert!(third.is_empty());
        assert_eq!(service.calls(), 3);
    }

    #[tokio::test]
    async fn mock_failure_propagates() {
        let service = MockDiarization::new().with_failure();
        assert!(service.transcribe(vec![0]).await.is_err());
        assert_eq!(service.calls(), 1);
    }

    #[test]
    fn diarized_response_tolerates_missing_segments_field() {
        let parsed: DiarizedResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.segments.is_empty());
    }

    #[test]
    fn diarized_response_parses_partial_segments() {
        let body = r#"{"segments":[{"speaker":"spk_0","text":"hi","start":0.1,"end":0.9},{"text":"no speaker"}]}"#;
        let parsed: DiarizedResponse = serde_json::from_str(body).unwrap();
        let segments = segment::normalize(parsed.segments);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].speaker, "spk_0");
        assert_eq!(segments[1].speaker, "Unknown");
        assert_eq!(segments[1].start, 0.0);
    }
}
