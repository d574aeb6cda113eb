//! Command-line interface for podscribe
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Chunked speaker-diarized transcription for podcast archives
#[derive(Parser, Debug)]
#[command(
    name = "podscribe",
    version,
    about = "Chunked speaker-diarized transcription for podcast archives",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Episode numbers to process (default: every episode in the catalog)
    #[arg(value_name = "EPISODE")]
    pub episodes: Vec<u32>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress progress output (failures and the summary still print)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Diarization model override
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Maximum chunk duration (default: 20m). Examples: 20m, 900s, 15m30s
    #[arg(long, short = 'c', value_name = "DURATION", value_parser = parse_chunk_secs)]
    pub chunk_length: Option<f64>,
}

/// Parse a chunk duration string into seconds.
///
/// Supports bare numbers (seconds) and any format accepted by `humantime`:
/// single-unit (`900s`, `20m`) and compound (`15m30s`).
fn parse_chunk_secs(s: &str) -> Result<f64, String> {
    let s = s.trim();
    let secs = if let Ok(secs) = s.parse::<f64>() {
        secs
    } else {
        humantime::parse_duration(s)
            .map(|d| d.as_secs_f64())
            .map_err(|e| e.to_string())?
    };
    if secs <= 0.0 {
        return Err("chunk duration must be positive".to_string());
    }
    Ok(secs)
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify external dependencies and credentials
    Check,

    /// List catalog episodes and their transcript status
    Episodes,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_chunk_secs_accepts_bare_seconds() {
        assert_eq!(parse_chunk_secs("1200").unwrap(), 1200.0);
    }

    #[test]
    fn parse_chunk_secs_accepts_humantime_forms() {
        assert_eq!(parse_chunk_secs("20m").unwrap(), 1200.0);
        assert_eq!(parse_chunk_secs("15m30s").unwrap(), 930.0);
    }

    #[test]
    fn parse_chunk_secs_rejects_zero_and_garbage() {
        assert!(parse_chunk_secs("0").is_err());
        assert!(parse_chunk_secs("soon").is_err());
    }

    #[test]
    fn episode_filter_parses_from_args() {
        let cli = Cli::parse_from(["podscribe", "145", "146"]);
        assert_eq!(cli.episodes, vec![145, 146]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn check_subcommand_parses() {
        let cli = Cli::parse_from(["podscribe", "check"]);
        assert!(matches!(cli.command, Some(Commands::Check)));
    }
}
