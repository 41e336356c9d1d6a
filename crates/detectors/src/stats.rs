//! Small numeric helpers shared by the detectors.

/// Arithmetic mean. Callers guarantee `values` is non-empty.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator). Callers guarantee
/// `values` has at least two elements.
pub fn sample_std(values: &[f64], mean: f64) -> f64 {
    let sum_sq: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Linear-interpolation quantile over an ascending-sorted slice, using the
/// `(n - 1) * q` position rule. Callers guarantee `sorted` is non-empty and
/// `q` is in [0, 1].
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lo = position.floor() as usize;
    let hi = position.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let fraction = position - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_known_values() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
    }

    #[test]
    fn sample_std_uses_n_minus_one() {
        // Variance of [2, 4, 4, 4, 5, 5, 7, 9] around mean 5 is 32/7 sample.
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&values);
        assert_eq!(m, 5.0);
        let expected = (32.0f64 / 7.0).sqrt();
        assert!((sample_std(&values, m) - expected).abs() < 1e-12);
    }

    #[test]
    fn quantile_interpolates_linearly() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        // Positions: q1 at 0.75 -> 1.75, q3 at 2.25 -> 3.25.
        assert_eq!(quantile(&sorted, 0.25), 1.75);
        assert_eq!(quantile(&sorted, 0.75), 3.25);
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
        assert_eq!(quantile(&sorted, 0.5), 2.5);
    }
}
