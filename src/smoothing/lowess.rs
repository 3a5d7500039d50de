use super::kernel::{bisquare, median, tricube};

const VARIANCE_EPSILON: f64 = 1e-12;

/// Robust locally weighted linear regression.
///
/// `xs` must be sorted ascending and have the same length as `ys`.
/// `bandwidth` is the number of neighbouring points in each local fit and is
/// clamped to `[2, n]`. Runs `iterations + 1` passes; every pass after the
/// first reweights points by Tukey's biweight of their previous residual.
/// Returns the fitted value for every input point.
pub fn lowess(xs: &[f64], ys: &[f64], bandwidth: usize, iterations: usize) -> Vec<f64> {
    let n = xs.len().min(ys.len());
    if n < 3 {
        return ys[..n].to_vec();
    }
    let bandwidth = bandwidth.clamp(2, n);

    let mut fitted = vec![0.0; n];
    let mut residuals = vec![0.0; n];
    let mut robustness = vec![1.0; n];

    for pass in 0..=iterations {
        let mut left = 0;
        let mut right = bandwidth - 1;

        for j in 0..n {
            let x = xs[j];
            // Slide while the next point outside is closer than the leftmost
            // point inside, so the window catches up after a gap in x. Tied
            // x values can leave j past the window, so that case slides too.
            while right + 1 < n && (right < j || xs[right + 1] - x < x - xs[left]) {
                left += 1;
                right += 1;
            }

            fitted[j] = local_fit(xs, ys, &robustness, left, right, j);
            residuals[j] = (ys[j] - fitted[j]).abs();
        }

        if pass == iterations {
            break;
        }

        let median_residual = median(&residuals[..n]);
        if median_residual == 0.0 {
            break;
        }
        for (weight, residual) in robustness.iter_mut().zip(&residuals) {
            *weight = bisquare(residual / (6.0 * median_residual));
        }
    }

    fitted
}

/// Weighted least-squares line over `[left, right]`, evaluated at `xs[j]`
fn local_fit(
    xs: &[f64],
    ys: &[f64],
    robustness: &[f64],
    left: usize,
    right: usize,
    j: usize,
) -> f64 {
    let x = xs[j];
    let edge = if x - xs[left] > xs[right] - x {
        left
    } else {
        right
    };
    let max_distance = (xs[edge] - x).abs();

    let mut sum_w = 0.0;
    let mut sum_x = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;

    for k in left..=right {
        let u = if max_distance > 0.0 {
            (xs[k] - x).abs() / max_distance
        } else {
            0.0
        };
        let w = tricube(u) * robustness[k];
        sum_w += w;
        sum_x += w * xs[k];
        sum_xx += w * xs[k] * xs[k];
        sum_y += w * ys[k];
        sum_xy += w * xs[k] * ys[k];
    }

    // Everything in the window was weighted out: keep the observation
    if sum_w <= 0.0 {
        return ys[j];
    }

    let mean_x = sum_x / sum_w;
    let mean_xx = sum_xx / sum_w;
    let mean_y = sum_y / sum_w;
    let mean_xy = sum_xy / sum_w;

    // A window whose weighted x variance vanishes (down to rounding noise)
    // gets a flat fit
    let denominator = mean_xx - mean_x * mean_x;
    let slope = if denominator <= mean_xx.abs() * VARIANCE_EPSILON {
        0.0
    } else {
        (mean_xy - mean_x * mean_y) / denominator
    };
    let intercept = mean_y - slope * mean_x;

    slope * x + intercept
}
