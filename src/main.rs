use anyhow::Result;
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use podscribe::audio::toolchain::FfmpegToolchain;
use podscribe::catalog::Catalog;
use podscribe::cli::{Cli, Commands};
use podscribe::config::{self, Config};
use podscribe::diagnostics::check_dependencies;
use podscribe::pipeline::Orchestrator;
use podscribe::transcribe::service::OpenAiDiarization;
use podscribe::{output, store};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            run_transcribe(cli).await?;
        }
        Some(Commands::Check) => {
            let config = load_config(cli.config.as_deref())?;
            if !check_dependencies(&config) {
                std::process::exit(1);
            }
        }
        Some(Commands::Episodes) => {
            let config = load_config(cli.config.as_deref())?;
            list_episodes(&config)?;
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Run the transcription batch over the catalog.
async fn run_transcribe(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(model) = cli.model {
        config.transcription.model = model;
    }
    if let Some(chunk_length) = cli.chunk_length {
        config.chunking.max_chunk_secs = chunk_length;
    }

    let api_key = config::resolve_api_key()?;
    let toolchain = FfmpegToolchain::new(&config.chunking.encoder, &config.chunking.bitrate);
    let service = OpenAiDiarization::new(
        &config.transcription.api_base,
        &api_key,
        &config.transcription.model,
    );

    let mut catalog = Catalog::load(&config.paths.catalog)?;
    if !cli.quiet {
        eprintln!(
            "Found {} episode(s) in catalog, model {}",
            catalog.episodes().len(),
            config.transcription.model.bold()
        );
    }

    let orchestrator = Orchestrator::new(&config, &toolchain, &service).with_quiet(cli.quiet);
    let summary = orchestrator.run_batch(&mut catalog, &cli.episodes).await;
    output::batch_summary(&summary);

    if summary.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Print every catalog episode with its transcript status.
fn list_episodes(config: &Config) -> Result<()> {
    let catalog = Catalog::load(&config.paths.catalog)?;
    for episode in catalog.episodes() {
        let status = if store::transcript_exists(&config.paths.transcript_dir, episode) {
            "transcribed".green().to_string()
        } else {
            "pending".yellow().to_string()
        };
        println!("{:>4}  {:<12}  {}", episode.number, status, episode.title);
    }
    Ok(())
}

/// Load configuration from an explicit path or the default location.
fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&Config::default_path())?,
    };
    Ok(config.with_env_overrides())
}
