use serde::{Deserialize, Serialize};

/// A single pitch-track sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchFrame {
    /// Frame time in seconds
    pub time: f64,
    /// Whether the tracker marked this frame as voiced
    pub voiced: bool,
    /// F0 in Hz before normalization, semitone offset from the corpus mean after
    pub value: f64,
}

impl PitchFrame {
    pub fn new(time: f64, voiced: bool, value: f64) -> Self {
        Self {
            time,
            voiced,
            value,
        }
    }

    /// Build a frame from the three columns of an EST track line.
    /// Only a voicing flag of exactly 1 counts as voiced.
    pub fn from_est_columns(time: f64, voicing: f64, value: f64) -> Self {
        Self::new(time, voicing == 1.0, value)
    }
}

/// Keep only the voiced frames of a sequence, in order
pub fn voiced_frames(frames: &[PitchFrame]) -> Vec<PitchFrame> {
    frames.iter().filter(|f| f.voiced).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_est_columns() {
        assert!(PitchFrame::from_est_columns(0.005, 1.0, 120.0).voiced);
        assert!(!PitchFrame::from_est_columns(0.005, 0.0, 0.0).voiced);
        assert!(!PitchFrame::from_est_columns(0.005, 0.5, 110.0).voiced);
    }

    #[test]
    fn test_voiced_frames_keeps_order() {
        let frames = vec![
            PitchFrame::new(0.0, false, 0.0),
            PitchFrame::new(0.005, true, 100.0),
            PitchFrame::new(0.010, false, 0.0),
            PitchFrame::new(0.015, true, 110.0),
        ];

        let voiced = voiced_frames(&frames);

        assert_eq!(voiced.len(), 2);
        assert_eq!(voiced[0].value, 100.0);
        assert_eq!(voiced[1].value, 110.0);
    }
}
