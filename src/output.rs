//! Shared terminal reporting for batch runs.

use crate::pipeline::BatchSummary;

const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Print the banner for an episode being processed.
pub fn episode_banner(number: u32, title: &str) {
    eprintln!();
    eprintln!("{DIM}{}{RESET}", "=".repeat(60));
    eprintln!("Episode {number}: {title}");
    eprintln!("{DIM}{}{RESET}", "=".repeat(60));
}

/// Print a pipeline stage progress line.
pub fn stage(message: &str) {
    eprintln!("  {DIM}{message}{RESET}");
}

/// Print a success line.
pub fn success(message: &str) {
    eprintln!("  {GREEN}{message}{RESET}");
}

/// Print a non-fatal notice.
pub fn notice(message: &str) {
    eprintln!("  {YELLOW}{message}{RESET}");
}

/// Report an episode failure with the failing stage and cause.
///
/// Episode failures never stop the batch; this line is the record of why
/// the episode was left untranscribed.
pub fn episode_failure(number: u32, stage: &str, cause: &dyn std::fmt::Display) {
    eprintln!("  {RED}Episode {number} failed during {stage}: {cause}{RESET}");
}

/// Print the end-of-batch summary.
pub fn batch_summary(summary: &BatchSummary) {
    eprintln!();
    eprintln!("{DIM}{}{RESET}", "=".repeat(60));
    eprintln!(
        "Done. Processed: {}, skipped: {}, failed: {}",
        summary.processed, summary.skipped, summary.failed
    );
    eprintln!("{DIM}{}{RESET}", "=".repeat(60));
}
