//! Transcript text rendering.
//!
//! Layout, one piece per line with blank-line separation:
//!
//! ```text
//! ----- chunk 0 start @ 00:00:00 -----
//!
//! [00:00:01] [Speaker A]: hello there
//!
//! [00:00:12] [Speaker B]: hi
//! ```
//!
//! Blocks carry start-only timestamps; an end time on a long speaker turn
//! adds noise without aiding navigation.

use crate::transcript::merge::TranscriptLine;

/// Format seconds as `HH:MM:SS`, flooring fractional seconds.
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Render the merged transcript lines into the persisted text artifact.
///
/// Deterministic: the same line sequence always produces identical text.
pub fn render(lines: &[TranscriptLine]) -> String {
    let mut rendered = Vec::with_capacity(lines.len());
    for line in lines {
        match line {
            TranscriptLine::Marker { index, offset } => {
                rendered.push(format!(
                    "----- chunk {index} start @ {} -----\n",
                    format_timestamp(*offset)
                ));
            }
            TranscriptLine::Block(block) => {
                rendered.push(format!(
                    "[{}] [Speaker {}]: {}\n",
                    format_timestamp(block.start),
                    block.speaker,
                    block.text
                ));
            }
        }
    }
    rendered.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::merge::TranscriptBlock;

    #[test]
    fn timestamp_formats_zero() {
        assert_eq!(format_timestamp(0.0), "00:00:00");
    }

    #[test]
    fn timestamp_floors_fractional_seconds() {
        assert_eq!(format_timestamp(59.94), "00:00:59");
    }

    #[test]
    fn timestamp_formats_minutes_and_hours() {
        assert_eq!(format_timestamp(75.0), "00:01:15");
        assert_eq!(format_timestamp(3600.0), "01:00:00");
        assert_eq!(format_timestamp(7384.0), "02:03:04");
    }

    #[test]
    fn timestamp_clamps_negative_input() {
        assert_eq!(format_timestamp(-3.0), "00:00:00");
    }

    #[test]
    fn renders_marker_line() {
        let lines = vec![TranscriptLine::Marker {
            index: 1,
            offset: 1200.0,
        }];
        assert_eq!(render(&lines), "----- chunk 1 start @ 00:20:00 -----\n");
    }

    #[test]
    fn renders_block_line() {
        let lines = vec![TranscriptLine::Block(TranscriptBlock {
            speaker: "A".to_string(),
            start: 2.0,
            text: "hi there".to_string(),
        })];
        assert_eq!(render(&lines), "[00:00:02] [Speaker A]: hi there\n");
    }

    #[test]
    fn lines_are_blank_line_separated() {
        let lines = vec![
            TranscriptLine::Marker {
                index: 0,
                offset: 0.0,
            },
            TranscriptLine::Block(TranscriptBlock {
                speaker: "A".to_string(),
                start: 0.0,
                text: "hi".to_string(),
            }),
            TranscriptLine::Block(TranscriptBlock {
                speaker: "B".to_string(),
                start: 2.0,
                text: "ok".to_string(),
            }),
        ];
        let text = render(&lines);
        assert_eq!(
            text,
            "----- chunk 0 start @ 00:00:00 -----\n\
             \n\
             [00:00:00] [Speaker A]: hi\n\
             \n\
             [00:00:02] [Speaker B]: ok\n"
        );
    }

    #[test]
    fn render_of_empty_lines_is_empty() {
        assert_eq!(render(&[]), "");
    }
}
