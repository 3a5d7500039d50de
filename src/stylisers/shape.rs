use crate::models::{ExtremePosition, PitchFrame};

/// Syllables with this many frames or fewer are not stylised
pub const MIN_STYLISED_FRAMES: usize = 3;

/// Which endpoint an internal extreme is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Beginning,
    End,
}

/// Shape summary of a normalized syllable contour, shared by all stylisers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourShape {
    /// First semitone value
    pub start: f64,
    /// Last semitone value
    pub end: f64,
    /// Value of the global extreme (max or min, whichever is larger in magnitude)
    pub extreme: f64,
    /// Index of the global extreme in the frame sequence
    pub extreme_pos: usize,
    /// Number of frames
    pub len: usize,
}

impl ContourShape {
    /// Summarize a frame sequence, or `None` when it is too short to stylise
    pub fn from_frames(frames: &[PitchFrame]) -> Option<Self> {
        if frames.len() <= MIN_STYLISED_FRAMES {
            return None;
        }
        let first = frames.first()?;
        let last = frames.last()?;

        let (mut max, mut max_pos) = (first.value, 0);
        let (mut min, mut min_pos) = (first.value, 0);
        for (i, frame) in frames.iter().enumerate().skip(1) {
            if frame.value > max {
                max = frame.value;
                max_pos = i;
            }
            if frame.value < min {
                min = frame.value;
                min_pos = i;
            }
        }

        // Ties go to the maximum
        let (extreme, extreme_pos) = if min.abs() > max.abs() {
            (min, min_pos)
        } else {
            (max, max_pos)
        };

        Some(Self {
            start: first.value,
            end: last.value,
            extreme,
            extreme_pos,
            len: frames.len(),
        })
    }

    /// Difference between the last and first value
    pub fn delta(&self) -> f64 {
        self.end - self.start
    }

    pub fn beg_diff(&self) -> f64 {
        self.extreme - self.start
    }

    pub fn end_diff(&self) -> f64 {
        self.extreme - self.end
    }

    /// An extreme on the first or last frame is not an internal peak or valley
    pub fn extreme_at_endpoint(&self) -> bool {
        self.extreme_pos == 0 || self.extreme_pos + 1 == self.len
    }

    /// The endpoint the extreme is closer to, with the matching difference.
    /// Equal distances count as the end side.
    pub fn nearest_side(&self) -> (Side, f64) {
        let beg = self.beg_diff();
        let end = self.end_diff();
        if beg.abs() < end.abs() {
            (Side::Beginning, beg)
        } else {
            (Side::End, end)
        }
    }

    /// `extreme_pos / len`; never reaches 1 because the denominator is the length
    pub fn position_ratio(&self) -> f64 {
        self.extreme_pos as f64 / self.len as f64
    }

    pub fn position(&self) -> ExtremePosition {
        ExtremePosition::from_ratio(self.position_ratio())
    }
}
