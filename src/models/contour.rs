use std::fmt;

use serde::{Deserialize, Serialize};

/// Discretized pitch level relative to the corpus mean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Register {
    VeryHigh,
    High,
    Medium,
    Low,
    VeryLow,
}

impl Register {
    /// Five-level register of a semitone value around `split`
    pub fn classify(value: f64, split: f64) -> Self {
        if value >= 3.0 * split {
            Register::VeryHigh
        } else if value >= split {
            Register::High
        } else if value > -split {
            Register::Medium
        } else if value > -3.0 * split {
            Register::Low
        } else {
            Register::VeryLow
        }
    }

    /// Three-level register: HIGH / MEDIUM / LOW around `split`
    pub fn classify_coarse(value: f64, split: f64) -> Self {
        if value >= split {
            Register::High
        } else if value > -split {
            Register::Medium
        } else {
            Register::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Register::VeryHigh => "VERY_HIGH",
            Register::High => "HIGH",
            Register::Medium => "MEDIUM",
            Register::Low => "LOW",
            Register::VeryLow => "VERY_LOW",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Movement between the first and last frame of a syllable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Slope {
    VeryUp,
    Up,
    Straight,
    Down,
    VeryDown,
}

impl Slope {
    /// Five-level slope: thresholds at `split` and `3 * split`
    pub fn classify(delta: f64, split: f64) -> Self {
        if delta >= 3.0 * split {
            Slope::VeryUp
        } else if delta >= split {
            Slope::Up
        } else if delta > -split {
            Slope::Straight
        } else if delta > -3.0 * split {
            Slope::Down
        } else {
            Slope::VeryDown
        }
    }

    /// Three-level slope: UP / STRAIGHT / DOWN
    pub fn classify_coarse(delta: f64, split: f64) -> Self {
        if delta >= split {
            Slope::Up
        } else if delta > -split {
            Slope::Straight
        } else {
            Slope::Down
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Slope::VeryUp => "VERY_UP",
            Slope::Up => "UP",
            Slope::Straight => "STRAIGHT",
            Slope::Down => "DOWN",
            Slope::VeryDown => "VERY_DOWN",
        }
    }
}

impl fmt::Display for Slope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where in the syllable an internal extreme sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtremePosition {
    Beginning,
    Middle,
    End,
}

impl ExtremePosition {
    /// Bucket a position ratio: >= 0.7 is the end, <= 0.3 the beginning
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 0.7 {
            ExtremePosition::End
        } else if ratio <= 0.3 {
            ExtremePosition::Beginning
        } else {
            ExtremePosition::Middle
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            ExtremePosition::Beginning => "BEGINNING_",
            ExtremePosition::Middle => "MIDDLE_",
            ExtremePosition::End => "END_",
        }
    }
}

/// Sign of an internal extreme relative to the nearer endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::Positive => "POSITIVE",
            Polarity::Negative => "NEGATIVE",
        }
    }
}

/// Label for the pitch level at syllable onset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContourStart {
    Unvoiced,
    Level(Register),
}

impl fmt::Display for ContourStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContourStart::Unvoiced => f.write_str("UNVOICED_START"),
            ContourStart::Level(register) => write!(f, "{}", register),
        }
    }
}

/// Label for the overall direction of the contour.
/// SLAM describes the end register instead of a slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContourDirection {
    Unvoiced,
    Slope(Slope),
    EndLevel(Register),
}

impl fmt::Display for ContourDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContourDirection::Unvoiced => f.write_str("UNVOICED_DIRECTION"),
            ContourDirection::Slope(slope) => write!(f, "{}", slope),
            ContourDirection::EndLevel(register) => write!(f, "{}", register),
        }
    }
}

/// Label for the internal peak or valley of the contour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContourExtreme {
    Unvoiced,
    NoExtreme,
    Polarity {
        position: Option<ExtremePosition>,
        polarity: Polarity,
    },
    Level {
        position: ExtremePosition,
        register: Register,
    },
}

impl ContourExtreme {
    pub fn is_extreme(&self) -> bool {
        matches!(
            self,
            ContourExtreme::Polarity { .. } | ContourExtreme::Level { .. }
        )
    }
}

impl fmt::Display for ContourExtreme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContourExtreme::Unvoiced => f.write_str("UNVOICED_EXTREME"),
            ContourExtreme::NoExtreme => f.write_str("NO_EXTREME"),
            ContourExtreme::Polarity { position, polarity } => {
                if let Some(position) = position {
                    f.write_str(position.prefix())?;
                }
                f.write_str(polarity.as_str())
            }
            ContourExtreme::Level { position, register } => {
                write!(f, "{}{}", position.prefix(), register)
            }
        }
    }
}

/// Stylisation result attached to a syllable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContourLabels {
    pub contour_start: ContourStart,
    pub contour_direction: ContourDirection,
    pub contour_extreme: ContourExtreme,
    /// Zero-based index of the global extreme in the smoothed frames
    pub contour_extreme_pos: Option<usize>,
}

impl ContourLabels {
    /// Labels for a syllable with too few voiced frames to stylise
    pub fn unvoiced() -> Self {
        Self {
            contour_start: ContourStart::Unvoiced,
            contour_direction: ContourDirection::Unvoiced,
            contour_extreme: ContourExtreme::Unvoiced,
            contour_extreme_pos: None,
        }
    }

    pub fn is_unvoiced(&self) -> bool {
        self.contour_start == ContourStart::Unvoiced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_boundaries() {
        assert_eq!(Register::classify(6.0, 2.0), Register::VeryHigh);
        assert_eq!(Register::classify(5.99, 2.0), Register::High);
        assert_eq!(Register::classify(2.0, 2.0), Register::High);
        assert_eq!(Register::classify(1.99, 2.0), Register::Medium);
        assert_eq!(Register::classify(-1.99, 2.0), Register::Medium);
        assert_eq!(Register::classify(-2.0, 2.0), Register::Low);
        assert_eq!(Register::classify(-5.99, 2.0), Register::Low);
        assert_eq!(Register::classify(-6.0, 2.0), Register::VeryLow);
    }

    #[test]
    fn test_coarse_register_has_three_levels() {
        assert_eq!(Register::classify_coarse(10.0, 1.5), Register::High);
        assert_eq!(Register::classify_coarse(-1.49, 1.5), Register::Medium);
        assert_eq!(Register::classify_coarse(-1.5, 1.5), Register::Low);
        assert_eq!(Register::classify_coarse(-10.0, 1.5), Register::Low);
    }

    #[test]
    fn test_slope_boundaries() {
        assert_eq!(Slope::classify(4.5, 1.5), Slope::VeryUp);
        assert_eq!(Slope::classify(1.5, 1.5), Slope::Up);
        assert_eq!(Slope::classify(0.0, 1.5), Slope::Straight);
        assert_eq!(Slope::classify(-1.5, 1.5), Slope::Down);
        assert_eq!(Slope::classify(-4.5, 1.5), Slope::VeryDown);
    }

    #[test]
    fn test_position_from_ratio() {
        assert_eq!(ExtremePosition::from_ratio(0.3), ExtremePosition::Beginning);
        assert_eq!(ExtremePosition::from_ratio(0.31), ExtremePosition::Middle);
        assert_eq!(ExtremePosition::from_ratio(0.69), ExtremePosition::Middle);
        assert_eq!(ExtremePosition::from_ratio(0.7), ExtremePosition::End);
    }

    #[test]
    fn test_extreme_display() {
        let jnd = ContourExtreme::Polarity {
            position: Some(ExtremePosition::End),
            polarity: Polarity::Negative,
        };
        let simple = ContourExtreme::Polarity {
            position: None,
            polarity: Polarity::Positive,
        };
        let slam = ContourExtreme::Level {
            position: ExtremePosition::Middle,
            register: Register::VeryHigh,
        };

        assert_eq!(jnd.to_string(), "END_NEGATIVE");
        assert_eq!(simple.to_string(), "POSITIVE");
        assert_eq!(slam.to_string(), "MIDDLE_VERY_HIGH");
        assert_eq!(ContourExtreme::NoExtreme.to_string(), "NO_EXTREME");
    }

    #[test]
    fn test_unvoiced_labels() {
        let labels = ContourLabels::unvoiced();

        assert!(labels.is_unvoiced());
        assert_eq!(labels.contour_start.to_string(), "UNVOICED_START");
        assert_eq!(labels.contour_direction.to_string(), "UNVOICED_DIRECTION");
        assert_eq!(labels.contour_extreme.to_string(), "UNVOICED_EXTREME");
        assert_eq!(labels.contour_extreme_pos, None);
    }
}
