use crate::models::{ContourDirection, ContourExtreme, ContourLabels, ContourStart, Register};

use super::{ContourShape, ContourStyliser, Side};

/// Register split, in semitones
const SPLIT: f64 = 2.0;
/// Minimum extreme prominence measured from the start
const BEGINNING_THRESHOLD: f64 = 2.0;
/// Minimum extreme prominence measured from the end
const END_THRESHOLD: f64 = 1.5;

/// SLAM stylisation: start register, end register, and the register of an
/// internal extreme with its position prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct Slam;

impl ContourStyliser for Slam {
    fn name(&self) -> &'static str {
        "SLAM"
    }

    fn stylise(&self, shape: &ContourShape) -> ContourLabels {
        ContourLabels {
            contour_start: ContourStart::Level(Register::classify(shape.start, SPLIT)),
            contour_direction: ContourDirection::EndLevel(Register::classify(shape.end, SPLIT)),
            contour_extreme: extreme_label(shape),
            contour_extreme_pos: Some(shape.extreme_pos),
        }
    }
}

fn extreme_label(shape: &ContourShape) -> ContourExtreme {
    if shape.extreme_at_endpoint() {
        return ContourExtreme::NoExtreme;
    }

    let (side, diff) = shape.nearest_side();
    let threshold = match side {
        Side::Beginning => BEGINNING_THRESHOLD,
        Side::End => END_THRESHOLD,
    };
    if diff.abs() < threshold {
        return ContourExtreme::NoExtreme;
    }

    ContourExtreme::Level {
        position: shape.position(),
        register: Register::classify(shape.extreme, SPLIT),
    }
}
