//! Error types for podscribe.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PodscribeError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("No API key found. Set OPENAI_API_KEY or add it to .credentials")]
    ApiKeyMissing,

    // Catalog errors
    #[error("Failed to read episode catalog at {path}: {message}")]
    CatalogRead { path: String, message: String },

    #[error("Failed to write episode catalog at {path}: {message}")]
    CatalogWrite { path: String, message: String },

    // Audio toolchain errors
    #[error("Audio encoder not found: {tool}")]
    EncoderMissing { tool: String },

    #[error("Could not determine audio duration for {path}")]
    DurationUnavailable { path: String },

    #[error("Chunk extraction failed at offset {offset}s: {message}")]
    ChunkExtractionFailed { offset: f64, message: String },

    // Transcription errors
    #[error("Transcription failed for chunk at offset {offset}s: {message}")]
    TranscriptionFailed { offset: f64, message: String },

    #[error("Episode {episode} produced no transcript segments")]
    EmptyTranscript { episode: u32 },

    // Download errors
    #[error("Failed to download {url}: {message}")]
    DownloadFailed { url: String, message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, PodscribeError>;
