use crate::defaults;
use crate::error::{PodscribeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub chunking: ChunkingConfig,
    pub transcription: TranscriptionConfig,
    pub paths: PathsConfig,
}

/// Audio chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum chunk duration in seconds. Must stay under the service's
    /// per-request ceiling (~1400s).
    pub max_chunk_secs: f64,
    /// Encoder bitrate for extracted chunks (e.g., "128k").
    pub bitrate: String,
    /// Encoder binary name or path.
    pub encoder: String,
}

/// Diarization service configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranscriptionConfig {
    pub model: String,
    pub api_base: String,
}

/// Filesystem layout configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory for downloaded episode audio.
    pub audio_dir: PathBuf,
    /// Directory for rendered transcripts.
    pub transcript_dir: PathBuf,
    /// Episode catalog file.
    pub catalog: PathBuf,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_secs: defaults::MAX_CHUNK_SECS,
            bitrate: defaults::CHUNK_BITRATE.to_string(),
            encoder: defaults::ENCODER_BIN.to_string(),
        }
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_MODEL.to_string(),
            api_base: defaults::API_BASE.to_string(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            audio_dir: PathBuf::from(defaults::AUDIO_DIR),
            transcript_dir: PathBuf::from(defaults::TRANSCRIPT_DIR),
            catalog: PathBuf::from(defaults::CATALOG_FILE),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PodscribeError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                PodscribeError::Io(e)
            }
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Errors are propagated for invalid TOML.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(PodscribeError::ConfigFileNotFound { .. }) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - PODSCRIBE_MODEL → transcription.model
    /// - PODSCRIBE_API_BASE → transcription.api_base
    /// - PODSCRIBE_ENCODER → chunking.encoder
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("PODSCRIBE_MODEL")
            && !model.is_empty()
        {
            self.transcription.model = model;
        }

        if let Ok(base) = std::env::var("PODSCRIBE_API_BASE")
            && !base.is_empty()
        {
            self.transcription.api_base = base;
        }

        if let Ok(encoder) = std::env::var("PODSCRIBE_ENCODER")
            && !encoder.is_empty()
        {
            self.chunking.encoder = encoder;
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/podscribe/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("podscribe")
            .join("config.toml")
    }
}

/// Resolve the diarization API key.
///
/// Checks the environment first, then scans the `.credentials` file in the
/// working directory for an `OPENAI_API_KEY=...` line.
pub fn resolve_api_key() -> Result<String> {
    if let Ok(key) = std::env::var(defaults::API_KEY_ENV)
        && !key.is_empty()
    {
        return Ok(key);
    }

    let credentials = Path::new(defaults::CREDENTIALS_FILE);
    if credentials.exists() {
        let contents = fs::read_to_string(credentials)?;
        for line in contents.lines() {
            if let Some(rest) = line.strip_prefix(defaults::API_KEY_ENV)
                && let Some(value) = rest.strip_prefix('=')
            {
                let value = value.trim();
                if !value.is_empty() {
                    return Ok(value.to_string());
                }
            }
        }
    }

    Err(PodscribeError::ApiKeyMissing)
}
