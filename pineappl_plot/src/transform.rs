//! Numerical transformations applied to predictions before they are drawn.

use super::slice::PdfResult;

/// Returns the difference of `a` relative to `b` in per cent. A vanishing `b` gives a
/// non-finite result, which is drawn as a gap.
#[must_use]
pub fn percent_diff(a: f64, b: f64) -> f64 {
    (a / b - 1.0) * 100.0
}

/// Element-wise [`percent_diff`] of two arrays.
#[must_use]
pub fn percent_diffs(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(&a, &b)| percent_diff(a, b)).collect()
}

/// Returns the uncertainty of `y` in the direction of `y_ref`: the lower uncertainty if `y` lies
/// above the reference, the upper one otherwise.
#[must_use]
pub fn one_sided_error(y: f64, ymin: f64, ymax: f64, y_ref: f64) -> f64 {
    if y > y_ref { y - ymin } else { ymax - y }
}

/// Calculates the pull of `y` with respect to `y_ref` in units of the combined uncertainty.
/// Identical values always have a pull of exactly zero, even if both uncertainties vanish.
#[must_use]
pub fn pull(y: f64, y_ref: f64, y_err: f64, ref_err: f64) -> f64 {
    let diff = y - y_ref;

    if diff == 0.0 {
        0.0
    } else {
        diff / y_err.hypot(ref_err)
    }
}

/// Calculates the pulls of every entry of `result` with respect to `reference`. The uncertainty
/// of the reference is the symmetrized half-width of its envelope.
#[must_use]
pub fn pulls(result: &PdfResult, reference: &PdfResult) -> Vec<f64> {
    result
        .y
        .iter()
        .zip(&result.ymin)
        .zip(&result.ymax)
        .zip(reference.y.iter().zip(&reference.ymin).zip(&reference.ymax))
        .map(|(((&y, &ymin), &ymax), ((&y_ref, &ref_min), &ref_max))| {
            let y_err = one_sided_error(y, ymin, ymax, y_ref);
            pull(y, y_ref, y_err, 0.5 * (ref_max - ref_min))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn result(y: &[f64], ymin: &[f64], ymax: &[f64]) -> PdfResult {
        PdfResult {
            label: String::new(),
            y: y.to_vec(),
            ymin: ymin.to_vec(),
            ymax: ymax.to_vec(),
        }
    }

    #[test]
    fn percent_diff_of_identical_values_vanishes() {
        for a in [1e-12, 0.5, 1.0, -3.0, 377.5, 1e15] {
            assert_eq!(percent_diff(a, a), 0.0);
        }
    }

    #[test]
    fn percent_diff_scales_linearly() {
        for k in [0.5, 1.1, 2.0, 3.0] {
            for b in [1.0, 4.0, 250.0] {
                assert_approx_eq!(f64, percent_diff(k * b, b), (k - 1.0) * 100.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn percent_diff_with_zero_baseline_is_not_finite() {
        assert!(!percent_diff(1.0, 0.0).is_finite());
        assert!(percent_diff(0.0, 0.0).is_nan());
    }

    #[test]
    fn one_sided_error_picks_side_towards_reference() {
        assert_eq!(one_sided_error(10.0, 9.0, 12.0, 8.0), 1.0);
        assert_eq!(one_sided_error(10.0, 9.0, 12.0, 11.0), 2.0);
        assert_eq!(one_sided_error(10.0, 9.0, 12.0, 10.0), 2.0);
    }

    #[test]
    fn pull_of_identical_values_is_zero() {
        assert_eq!(pull(3.0, 3.0, 0.0, 0.0), 0.0);
        assert_eq!(pull(3.0, 3.0, 1e-300, 0.0), 0.0);
        assert_eq!(pull(3.0, 3.0, 5.0, 7.0), 0.0);
    }

    #[test]
    fn pull_uses_combined_uncertainty() {
        assert_approx_eq!(f64, pull(5.0, 0.0, 3.0, 4.0), 1.0, ulps = 4);
        assert_approx_eq!(f64, pull(-10.0, 0.0, 6.0, 8.0), -1.0, ulps = 4);
    }

    #[test]
    fn pulls_against_reference() {
        let reference = result(&[10.0, 10.0], &[9.0, 9.0], &[11.0, 11.0]);
        let other = result(&[13.0, 7.0], &[10.0, 6.0], &[14.0, 11.0]);

        let pulls_ref = pulls(&reference, &reference);
        assert_eq!(pulls_ref, vec![0.0, 0.0]);

        // first bin: (13 - 10) / sqrt(3^2 + 1^2), second bin: (7 - 10) / sqrt(4^2 + 1^2)
        let pulls_other = pulls(&other, &reference);
        assert_approx_eq!(f64, pulls_other[0], 3.0 / 10.0_f64.sqrt(), ulps = 4);
        assert_approx_eq!(f64, pulls_other[1], -3.0 / 17.0_f64.sqrt(), ulps = 4);
    }
}
