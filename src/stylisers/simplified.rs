use crate::models::{ContourDirection, ContourExtreme, ContourLabels, ContourStart, Register, Slope};

use super::{ContourShape, ContourStyliser, extreme_polarity};

/// Split between levels, in semitones
const SPLIT: f64 = 1.5;

/// Three-level stylisation: HIGH/MEDIUM/LOW start, UP/STRAIGHT/DOWN
/// direction, and an unpositioned POSITIVE/NEGATIVE extreme.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simplified;

impl ContourStyliser for Simplified {
    fn name(&self) -> &'static str {
        "SIMPLIFIED"
    }

    fn stylise(&self, shape: &ContourShape) -> ContourLabels {
        let contour_extreme = match extreme_polarity(shape, SPLIT) {
            Some(polarity) => ContourExtreme::Polarity {
                position: None,
                polarity,
            },
            None => ContourExtreme::NoExtreme,
        };

        ContourLabels {
            contour_start: ContourStart::Level(Register::classify_coarse(shape.start, SPLIT)),
            contour_direction: ContourDirection::Slope(Slope::classify_coarse(shape.delta(), SPLIT)),
            contour_extreme,
            contour_extreme_pos: Some(shape.extreme_pos),
        }
    }
}
