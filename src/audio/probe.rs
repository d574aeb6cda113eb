//! Audio duration probing without full decoding.
//!
//! Two strategies, tried in order:
//! 1. Container metadata read (symphonia): cheap, no subprocess.
//! 2. Encoder info mode: parse the `Duration: HH:MM:SS.ff` field from the
//!    diagnostic output. Tool- and locale-dependent, so treated as a
//!    best-effort secondary path.

use crate::audio::toolchain::AudioToolchain;
use crate::error::{PodscribeError, Result};
use std::fs::File;
use std::path::Path;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Determine the total duration of an audio file in seconds.
///
/// Fatal for the episode (not the process) when both strategies fail.
pub fn probe_duration(path: &Path, toolchain: &dyn AudioToolchain) -> Result<f64> {
    if let Some(secs) = metadata_duration(path)
        && secs > 0.0
    {
        return Ok(secs);
    }

    let info = toolchain.media_info(path)?;
    parse_info_duration(&info).ok_or_else(|| PodscribeError::DurationUnavailable {
        path: path.display().to_string(),
    })
}

/// Read the duration from container metadata without decoding frames.
fn metadata_duration(path: &Path) -> Option<f64> {
    let file = File::open(path).ok()?;
    let stream = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .ok()?;

    let track = probed
        .format
        .tracks()
        .iter()
        .find(|t| t.codec_params.time_base.is_some() && t.codec_params.n_frames.is_some())?;

    let time_base = track.codec_params.time_base?;
    let n_frames = track.codec_params.n_frames?;
    let time = time_base.calc_time(n_frames);
    Some(time.seconds as f64 + time.frac)
}

/// Parse a `Duration: HH:MM:SS.ff` field out of encoder diagnostic text.
///
/// Accepts `.` or `,` as the fraction separator (the encoder follows the
/// locale). Returns `None` when no parseable field is present (e.g.,
/// `Duration: N/A` for broken streams).
pub(crate) fn parse_info_duration(info: &str) -> Option<f64> {
    let rest = info.split("Duration:").nth(1)?;
    let field: String = rest
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, ':' | '.' | ','))
        .collect();
    // The field separator after the timestamp is a comma; drop it so a
    // locale comma inside the timestamp still parses.
    let field = field.trim_end_matches(',');

    let mut parts = field.split(':');
    let hours: u64 = parts.next()?.parse().ok()?;
    let minutes: u64 = parts.next()?.parse().ok()?;
    let seconds_part = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let (whole, frac) = match seconds_part.split_once(['.', ',']) {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (seconds_part, None),
    };
    let seconds: u64 = whole.parse().ok()?;

    let mut total = (hours * 3600 + minutes * 60 + seconds) as f64;
    if let Some(frac) = frac
        && !frac.is_empty()
    {
        let digits: u32 = frac.len().try_into().ok()?;
        let value: f64 = frac.parse().ok()?;
        total += value / 10f64.powi(digits as i32);
    }

    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::toolchain::MockToolchain;

    #[test]
    fn parses_duration_with_dot_fraction() {
        let info = "Input #0, mp3, from 'ep.mp3':\n  Duration: 00:03:12.34, start: 0.000000, bitrate: 128 kb/s\n";
        let secs = parse_info_duration(info).unwrap();
        assert!((secs - 192.34).abs() < 1e-9);
    }

    #[test]
    fn parses_duration_with_comma_fraction() {
        let info = "  Duration: 00:03:12,34, start: 0.000000\n";
        let secs = parse_info_duration(info).unwrap();
        assert!((secs - 192.34).abs() < 1e-9);
    }

    #[test]
    fn parses_duration_without_fraction() {
        let secs = parse_info_duration("Duration: 01:00:05").unwrap();
        assert_eq!(secs, 3605.0);
    }

    #[test]
    fn parses_multi_hour_duration() {
        let secs = parse_info_duration("Duration: 02:30:00.50, bitrate").unwrap();
        assert!((secs - 9000.5).abs() < 1e-9);
    }

    #[test]
    fn rejects_missing_duration_field() {
        assert_eq!(parse_info_duration("Input #0, mp3"), None);
    }

    #[test]
    fn rejects_not_available_duration() {
        assert_eq!(parse_info_duration("Duration: N/A, bitrate: N/A"), None);
    }

    #[test]
    fn probe_falls_back_to_encoder_info() {
        // Path does not exist, so the metadata read fails and the
        // diagnostic-output fallback must be used.
        let toolchain = MockToolchain::new().with_info("Duration: 00:20:00.00, start: 0");
        let secs = probe_duration(Path::new("/nonexistent/ep.mp3"), &toolchain).unwrap();
        assert_eq!(secs, 1200.0);
    }

    #[test]
    fn probe_reports_unavailable_when_both_paths_fail() {
        let toolchain = MockToolchain::new().with_info("no duration here");
        let err = probe_duration(Path::new("/nonexistent/ep.mp3"), &toolchain).unwrap_err();
        assert!(matches!(
            err,
            PodscribeError::DurationUnavailable { .. }
        ));
    }
}
