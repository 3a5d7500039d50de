use crate::models::{ContourDirection, ContourExtreme, ContourLabels, ContourStart, Register, Slope};

use super::{ContourShape, ContourStyliser, extreme_polarity};

/// One just-noticeable difference, in semitones
const SPLIT: f64 = 1.5;

/// SLAM-style register labels with just-noticeable-difference thresholds.
///
/// Start is a five-level register, direction a five-level slope of
/// `end - start`, and the extreme carries a BEGINNING_/MIDDLE_/END_ prefix
/// ahead of its polarity.
#[derive(Debug, Clone, Copy, Default)]
pub struct JndSlam;

impl ContourStyliser for JndSlam {
    fn name(&self) -> &'static str {
        "JNDSLAM"
    }

    fn stylise(&self, shape: &ContourShape) -> ContourLabels {
        let contour_extreme = match extreme_polarity(shape, SPLIT) {
            Some(polarity) => ContourExtreme::Polarity {
                position: Some(shape.position()),
                polarity,
            },
            None => ContourExtreme::NoExtreme,
        };

        ContourLabels {
            contour_start: ContourStart::Level(Register::classify(shape.start, SPLIT)),
            contour_direction: ContourDirection::Slope(Slope::classify(shape.delta(), SPLIT)),
            contour_extreme,
            contour_extreme_pos: Some(shape.extreme_pos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PitchFrame;

    fn stylise(values: &[f64]) -> ContourLabels {
        let frames: Vec<PitchFrame> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| PitchFrame::new(i as f64, true, v))
            .collect();
        JndSlam.stylise(&ContourShape::from_frames(&frames).unwrap())
    }

    #[test]
    fn test_very_high_start_and_very_up() {
        let l = stylise(&[4.5, 6.0, 7.5, 9.0]);
        assert_eq!(l.contour_start.to_string(), "VERY_HIGH");
        assert_eq!(l.contour_direction.to_string(), "VERY_UP");
        assert_eq!(l.contour_extreme.to_string(), "NO_EXTREME");
    }

    #[test]
    fn test_low_start_and_down() {
        let l = stylise(&[-2.0, -3.0, -4.0, -4.5]);
        assert_eq!(l.contour_start.to_string(), "LOW");
        assert_eq!(l.contour_direction.to_string(), "DOWN");
    }

    #[test]
    fn test_very_down() {
        let l = stylise(&[0.0, -2.0, -4.0, -5.0]);
        assert_eq!(l.contour_direction.to_string(), "VERY_DOWN");
    }

    #[test]
    fn test_extreme_prefixes() {
        // Peak at index 1 of 10: ratio 0.1
        let mut values = vec![0.0; 10];
        values[1] = 4.0;
        assert_eq!(stylise(&values).contour_extreme.to_string(), "BEGINNING_POSITIVE");

        // Valley at index 5 of 10: ratio 0.5
        let mut values = vec![0.0; 10];
        values[5] = -4.0;
        assert_eq!(stylise(&values).contour_extreme.to_string(), "MIDDLE_NEGATIVE");

        // Peak at index 8 of 10: ratio 0.8
        let mut values = vec![0.0; 10];
        values[8] = 4.0;
        assert_eq!(stylise(&values).contour_extreme.to_string(), "END_POSITIVE");
    }

    #[test]
    fn test_endpoint_extreme_is_suppressed() {
        let l = stylise(&[12.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(l.contour_extreme.to_string(), "NO_EXTREME");
    }
}
