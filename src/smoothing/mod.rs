pub mod kernel;
pub mod lowess;

pub use kernel::{bisquare, median, tricube};
pub use lowess::lowess;

use crate::error::{Result, StyleError};
use crate::models::{voiced_frames, PitchFrame};

/// Configuration for LOWESS smoothing of a syllable's pitch frames
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothingConfig {
    /// Fraction of the voiced points in each local regression, in (0, 1]
    pub span: f64,
    /// Number of robustness re-weighting passes
    pub iterations: usize,
    /// Use the voiced-frame index instead of time as the regression axis,
    /// so gaps left by unvoiced frames do not count as distance
    pub ignore_unvoiced: bool,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            span: 0.2,
            iterations: 3,
            ignore_unvoiced: false,
        }
    }
}

impl SmoothingConfig {
    /// Check that `span` lies in (0, 1]
    pub fn validate(&self) -> Result<()> {
        if !(self.span > 0.0 && self.span <= 1.0) {
            return Err(StyleError::invalid_argument(format!(
                "smoothing span must be in (0, 1], got {}",
                self.span
            )));
        }
        Ok(())
    }

    /// Points per local window for `n` voiced points
    pub fn bandwidth(&self, n: usize) -> usize {
        ((n as f64 * self.span).ceil() as usize).max(2)
    }
}

/// Smooth a syllable's frames with robust LOWESS.
///
/// Only voiced frames take part. The result has exactly one frame per voiced
/// input frame, marked voiced and carrying the fitted value; unvoiced frames
/// are dropped. With fewer than three voiced frames the voiced frames are
/// returned unmodified.
pub fn smooth(frames: &[PitchFrame], config: &SmoothingConfig) -> Result<Vec<PitchFrame>> {
    config.validate()?;

    let voiced = voiced_frames(frames);
    let n = voiced.len();
    if n < 3 {
        return Ok(voiced);
    }

    let xs: Vec<f64> = if config.ignore_unvoiced {
        (1..=n).map(|count| count as f64).collect()
    } else {
        voiced.iter().map(|f| f.time).collect()
    };
    let ys: Vec<f64> = voiced.iter().map(|f| f.value).collect();

    let fitted = lowess(&xs, &ys, config.bandwidth(n), config.iterations);

    Ok(voiced
        .iter()
        .zip(fitted)
        .map(|(frame, value)| PitchFrame::new(frame.time, true, value))
        .collect())
}
