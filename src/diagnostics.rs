//! System diagnostics and dependency checking.
//!
//! Verifies that the external encoder, credentials, and catalog are in
//! place before a batch run is attempted.

use crate::config::{self, Config};
use std::process::Command;

/// Result of a dependency check.
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Dependency is present and working
    Ok,
    /// Dependency is not found
    NotFound,
    /// Dependency is present but has issues
    Warning(String),
}

/// Check if a command exists and is executable.
fn check_command(command: &str) -> CheckResult {
    match Command::new(command).arg("-version").output() {
        Ok(output) if output.status.success() => CheckResult::Ok,
        Ok(_) => CheckResult::Warning(format!("'{}' found but -version failed", command)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => CheckResult::NotFound,
        Err(e) => CheckResult::Warning(format!("Error checking '{}': {}", command, e)),
    }
}

/// Check that an API key can be resolved.
fn check_api_key() -> CheckResult {
    match config::resolve_api_key() {
        Ok(_) => CheckResult::Ok,
        Err(_) => CheckResult::NotFound,
    }
}

/// Check that the episode catalog file exists.
fn check_catalog(config: &Config) -> CheckResult {
    if config.paths.catalog.exists() {
        CheckResult::Ok
    } else {
        CheckResult::NotFound
    }
}

/// Run all dependency checks, print a report, and return overall health.
pub fn check_dependencies(config: &Config) -> bool {
    let mut healthy = true;

    let encoder = &config.chunking.encoder;
    healthy &= report(
        &format!("encoder ({encoder})"),
        check_command(encoder),
        "Install ffmpeg: https://ffmpeg.org/download.html",
    );
    healthy &= report(
        "API key",
        check_api_key(),
        "Set OPENAI_API_KEY or add OPENAI_API_KEY=... to .credentials",
    );
    healthy &= report(
        "episode catalog",
        check_catalog(config),
        "Create the catalog JSON file (see README) or point paths.catalog at it",
    );

    healthy
}

fn report(name: &str, result: CheckResult, hint: &str) -> bool {
    match result {
        CheckResult::Ok => {
            eprintln!("  ok       {name}");
            true
        }
        CheckResult::NotFound => {
            eprintln!("  missing  {name}");
            eprintln!("           {hint}");
            false
        }
        CheckResult::Warning(message) => {
            eprintln!("  warning  {name}: {message}");
            true
        }
    }
}
