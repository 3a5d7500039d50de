use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::error::StyleError;
use crate::models::{PitchFrame, Syllable, Utterance};

/// Marker line closing the header of an EST track
pub const EST_HEADER_END: &str = "EST_Header_End";
/// Header length assumed when a track has no end-of-header marker
pub const EST_DEFAULT_HEADER_LINES: usize = 7;

/// Configuration for reading pitch tracks
#[derive(Debug, Clone, PartialEq)]
pub struct TrackConfig {
    /// Spacing between pitch frames in seconds
    pub frame_shift_s: f64,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            frame_shift_s: 0.005, // 5 ms frames
        }
    }
}

impl TrackConfig {
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(self.frame_shift_s > 0.0 && self.frame_shift_s.is_finite()) {
            return Err(StyleError::invalid_argument(format!(
                "frame shift must be a positive number of seconds, got {}",
                self.frame_shift_s
            )));
        }
        Ok(())
    }

    /// Index of the frame containing time `t`
    fn frame_index(&self, t: f64) -> usize {
        // The small offset keeps exact multiples of the shift on their own frame
        (t / self.frame_shift_s + 1e-9).floor().max(0.0) as usize
    }
}

/// Read and parse an EST pitch track file
pub fn parse_est_file(path: &Path) -> Result<Vec<PitchFrame>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read pitch track: {:?}", path))?;
    Ok(parse_est(&content))
}

/// Parse the `time voicing value` rows of an EST track.
///
/// Rows start after the `EST_Header_End` line, or after the first seven
/// lines when the marker is missing. Rows without exactly three numeric
/// columns are skipped.
pub fn parse_est(content: &str) -> Vec<PitchFrame> {
    let lines: Vec<&str> = content.lines().collect();
    let data_start = lines
        .iter()
        .position(|line| line.trim() == EST_HEADER_END)
        .map(|i| i + 1)
        .unwrap_or(EST_DEFAULT_HEADER_LINES);

    let mut frames = Vec::new();
    for (offset, line) in lines.iter().skip(data_start).enumerate() {
        let columns: Vec<&str> = line.split_whitespace().collect();
        if columns.len() != 3 {
            continue;
        }
        let parsed: Option<Vec<f64>> = columns.iter().map(|c| c.parse().ok()).collect();
        match parsed.as_deref() {
            Some(&[time, voicing, value]) => {
                frames.push(PitchFrame::from_est_columns(time, voicing, value))
            }
            _ => debug!("Skipping non-numeric track line {}", data_start + offset + 1),
        }
    }
    frames
}

/// Copy the frames covering `[start, end]` seconds out of a track.
///
/// The first frame index is `floor(start / shift)`, moved one frame later
/// unless it is the very first frame, so adjacent syllables do not share a
/// boundary frame. Indices past the end of the track are skipped with a
/// warning.
pub fn slice_frames(
    frames: &[PitchFrame],
    start: f64,
    end: f64,
    config: &TrackConfig,
) -> Vec<PitchFrame> {
    let mut first = config.frame_index(start);
    let last = config.frame_index(end);
    if first != 0 {
        first += 1;
    }

    let mut slice = Vec::new();
    let mut missing = 0;
    for i in first..=last {
        match frames.get(i) {
            Some(frame) => slice.push(*frame),
            None => missing += 1,
        }
    }

    if missing > 0 {
        warn!(
            "Out of range when slicing frames {} to {} from a track of {}; skipped {} samples",
            first,
            last,
            frames.len(),
            missing
        );
    }
    slice
}

/// Give every syllable of an utterance its slice of the pitch track
pub fn attach_track(utterance: Utterance, frames: &[PitchFrame], config: &TrackConfig) -> Utterance {
    let sylls: Vec<Syllable> = utterance
        .sylls
        .into_iter()
        .map(|syll| {
            let slice = slice_frames(frames, syll.start, syll.end, config);
            syll.with_pitch_values(slice)
        })
        .collect();
    Utterance::with_sylls(utterance.name, sylls)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK: &str = "EST_File Track
DataType ascii
NumFrames 6
NumChannels 1
NumAuxChannels 0
EqualSpace 1
BreaksPresent true
EST_Header_End
0.000 0 0.0
0.005 1 110.5
0.010 1 112.0
0.015 0 0.0
0.020 1 115.25
0.025 1 116.0
";

    fn config() -> TrackConfig {
        TrackConfig::default()
    }

    #[test]
    fn test_parse_est_after_header_marker() {
        let frames = parse_est(TRACK);

        assert_eq!(frames.len(), 6);
        assert!(!frames[0].voiced);
        assert!(frames[1].voiced);
        assert_eq!(frames[1].value, 110.5);
        assert_eq!(frames[4].value, 115.25);
    }

    #[test]
    fn test_parse_est_without_marker_skips_seven_lines() {
        let content = "h1\nh2\nh3\nh4\nh5\nh6\nh7\n0.0 1 100\n0.005 1 101\n";
        let frames = parse_est(content);

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].value, 100.0);
    }

    #[test]
    fn test_parse_est_skips_malformed_rows() {
        let content = "EST_Header_End\n0.0 1 100\n0.005 1\nfoo bar baz\n\n0.010 1 102\n";
        let frames = parse_est(content);

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].value, 102.0);
    }

    #[test]
    fn test_slice_first_syllable_includes_frame_zero() {
        let frames = parse_est(TRACK);
        let slice = slice_frames(&frames, 0.0, 0.010, &config());

        assert_eq!(slice.len(), 3);
        assert_eq!(slice[0].time, 0.0);
    }

    #[test]
    fn test_slice_later_syllable_skips_boundary_frame() {
        let frames = parse_est(TRACK);
        let slice = slice_frames(&frames, 0.010, 0.025, &config());

        // Frames 3, 4 and 5
        assert_eq!(slice.len(), 3);
        assert_eq!(slice[0].time, 0.015);
    }

    #[test]
    fn test_slice_out_of_range_is_skipped() {
        let frames = parse_est(TRACK);
        let slice = slice_frames(&frames, 0.020, 0.100, &config());

        // Frame 5 exists, 6..=20 do not
        assert_eq!(slice.len(), 1);
        assert_eq!(slice[0].value, 116.0);
    }

    #[test]
    fn test_attach_track() {
        let frames = parse_est(TRACK);
        let utt = Utterance::with_sylls(
            "utt",
            vec![Syllable::new(0.0, 0.010, "a"), Syllable::new(0.010, 0.025, "b")],
        );

        let utt = attach_track(utt, &frames, &config());

        assert_eq!(utt.sylls[0].pitch_values.len(), 3);
        assert_eq!(utt.sylls[1].pitch_values.len(), 3);
    }

    #[test]
    fn test_frame_shift_validation() {
        assert!(config().validate().is_ok());
        let bad = TrackConfig { frame_shift_s: 0.0 };
        assert!(matches!(bad.validate(), Err(StyleError::InvalidArgument(_))));
    }
}
