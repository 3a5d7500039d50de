/// Tricube kernel `(1 - |u|^3)^3`, zero outside `[-1, 1]`
pub fn tricube(u: f64) -> f64 {
    let a = u.abs();
    // NaN distances land here too
    if !(a <= 1.0) {
        return 0.0;
    }
    let t = 1.0 - a * a * a;
    t * t * t
}

/// Tukey's biweight for a scaled residual, zero once the ratio reaches 1
pub fn bisquare(ratio: f64) -> f64 {
    let a = ratio.abs();
    if !(a < 1.0) {
        return 0.0;
    }
    let t = 1.0 - a * a;
    t * t
}

/// Median as the element at `len / 2` of the sorted values (upper median
/// for even lengths). Returns 0 for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted[sorted.len() / 2]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tricube_endpoints() {
        assert_eq!(tricube(0.0), 1.0);
        assert_eq!(tricube(1.0), 0.0);
        assert_eq!(tricube(-1.0), 0.0);
        assert_eq!(tricube(1.5), 0.0);
        assert_eq!(tricube(f64::NAN), 0.0);
    }

    #[test]
    fn test_tricube_range() {
        for i in -100..=100 {
            let u = i as f64 / 100.0;
            let w = tricube(u);
            assert!((0.0..=1.0).contains(&w), "tricube({u}) = {w}");
        }
        assert_relative_eq!(tricube(0.5), (1.0f64 - 0.125).powi(3), epsilon = 1e-12);
        assert_eq!(tricube(0.25), tricube(-0.25));
    }

    #[test]
    fn test_bisquare() {
        assert_eq!(bisquare(0.0), 1.0);
        assert_eq!(bisquare(1.0), 0.0);
        assert_eq!(bisquare(2.0), 0.0);
        assert_relative_eq!(bisquare(0.5), 0.5625, epsilon = 1e-12);
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[]), 0.0);
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 3.0);
    }
}
