pub mod jndslam;
pub mod shape;
pub mod simplified;
pub mod slam;

pub use jndslam::*;
pub use shape::*;
pub use simplified::*;
pub use slam::*;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StyleError;
use crate::models::{ContourLabels, Polarity, Syllable};

/// A contour labelling scheme
pub trait ContourStyliser {
    /// Algorithm name as accepted on the command line
    fn name(&self) -> &'static str;

    /// Label a contour that has enough frames to be stylised
    fn stylise(&self, shape: &ContourShape) -> ContourLabels;
}

/// Selectable stylisation algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StyleAlgorithm {
    #[default]
    Simplified,
    Jndslam,
    Slam,
}

impl StyleAlgorithm {
    /// Resolve the algorithm into its styliser
    pub fn styliser(self) -> Box<dyn ContourStyliser> {
        match self {
            StyleAlgorithm::Simplified => Box::new(Simplified),
            StyleAlgorithm::Jndslam => Box::new(JndSlam),
            StyleAlgorithm::Slam => Box::new(Slam),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleAlgorithm::Simplified => "SIMPLIFIED",
            StyleAlgorithm::Jndslam => "JNDSLAM",
            StyleAlgorithm::Slam => "SLAM",
        }
    }
}

impl FromStr for StyleAlgorithm {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SIMPLIFIED" => Ok(StyleAlgorithm::Simplified),
            "JNDSLAM" => Ok(StyleAlgorithm::Jndslam),
            "SLAM" => Ok(StyleAlgorithm::Slam),
            other => Err(StyleError::invalid_argument(format!(
                "unknown stylisation algorithm '{}' (expected SIMPLIFIED, JNDSLAM or SLAM)",
                other
            ))),
        }
    }
}

impl fmt::Display for StyleAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Polarity of an internal extreme that clears `threshold` against the
/// nearer endpoint; `None` when the extreme sits on an endpoint or is too flat
pub fn extreme_polarity(shape: &ContourShape, threshold: f64) -> Option<Polarity> {
    if shape.extreme_at_endpoint() {
        return None;
    }
    let (_, diff) = shape.nearest_side();
    if diff >= threshold {
        Some(Polarity::Positive)
    } else if diff <= -threshold {
        Some(Polarity::Negative)
    } else {
        None
    }
}

/// Label a syllable's normalized frames, falling back to the unvoiced labels
/// when there are too few frames
pub fn stylise_syllable(syllable: &Syllable, styliser: &dyn ContourStyliser) -> ContourLabels {
    match ContourShape::from_frames(&syllable.pitch_values) {
        Some(shape) => styliser.stylise(&shape),
        None => ContourLabels::unvoiced(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContourExtreme, ContourStart, PitchFrame};

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("SIMPLIFIED".parse::<StyleAlgorithm>().unwrap(), StyleAlgorithm::Simplified);
        assert_eq!("jndslam".parse::<StyleAlgorithm>().unwrap(), StyleAlgorithm::Jndslam);
        assert_eq!(" Slam ".parse::<StyleAlgorithm>().unwrap(), StyleAlgorithm::Slam);
        assert!(matches!(
            "RAW".parse::<StyleAlgorithm>(),
            Err(StyleError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_default_algorithm() {
        assert_eq!(StyleAlgorithm::default(), StyleAlgorithm::Simplified);
        assert_eq!(StyleAlgorithm::default().styliser().name(), "SIMPLIFIED");
    }

    #[test]
    fn test_styliser_names_round_trip() {
        for algorithm in [StyleAlgorithm::Simplified, StyleAlgorithm::Jndslam, StyleAlgorithm::Slam] {
            let parsed: StyleAlgorithm = algorithm.styliser().name().parse().unwrap();
            assert_eq!(parsed, algorithm);
        }
    }

    #[test]
    fn test_short_syllable_is_unvoiced() {
        let syllable = Syllable::new(0.0, 0.1, "a").with_pitch_values(vec![
            PitchFrame::new(0.0, true, 1.0),
            PitchFrame::new(0.005, true, 2.0),
            PitchFrame::new(0.010, true, 3.0),
        ]);

        for algorithm in [StyleAlgorithm::Simplified, StyleAlgorithm::Jndslam, StyleAlgorithm::Slam] {
            let labels = stylise_syllable(&syllable, algorithm.styliser().as_ref());
            assert_eq!(labels, ContourLabels::unvoiced());
        }
    }

    #[test]
    fn test_every_stylised_syllable_gets_a_start_level() {
        let syllable = Syllable::new(0.0, 0.1, "a").with_pitch_values(
            (0..8)
                .map(|i| PitchFrame::new(i as f64 * 0.005, true, (i as f64 - 4.0) * 1.3))
                .collect(),
        );

        for algorithm in [StyleAlgorithm::Simplified, StyleAlgorithm::Jndslam, StyleAlgorithm::Slam] {
            let labels = stylise_syllable(&syllable, algorithm.styliser().as_ref());
            assert!(matches!(labels.contour_start, ContourStart::Level(_)));
        }
    }

    #[test]
    fn test_endpoint_extreme_never_labelled() {
        let syllable = Syllable::new(0.0, 0.1, "a").with_pitch_values(vec![
            PitchFrame::new(0.0, true, 0.0),
            PitchFrame::new(0.005, true, 0.5),
            PitchFrame::new(0.010, true, 1.0),
            PitchFrame::new(0.015, true, -20.0),
        ]);

        for algorithm in [StyleAlgorithm::Simplified, StyleAlgorithm::Jndslam, StyleAlgorithm::Slam] {
            let labels = stylise_syllable(&syllable, algorithm.styliser().as_ref());
            assert_eq!(labels.contour_extreme, ContourExtreme::NoExtreme);
        }
    }
}
