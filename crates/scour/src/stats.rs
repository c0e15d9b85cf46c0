//! Small numeric helpers shared by the pipeline stages.
//!
//! Quantiles use the linear-interpolation estimator on the sorted sample,
//! the same estimator pandas and NumPy default to, so fence values are
//! reproducible across runs and platforms.

use indexmap::IndexMap;

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (ddof = 0) around a known mean.
pub fn population_std(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Linearly interpolated quantile of an already-sorted, non-empty slice.
///
/// `q` is a fraction in `[0, 1]`: `quantile(s, 0.25)` is the first quartile.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    debug_assert!((0.0..=1.0).contains(&q));

    if sorted.len() == 1 {
        return sorted[0];
    }

    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;

    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Most frequent value. Ties resolve to the lexicographically smallest of
/// the equally frequent values, so the result is stable under row
/// reordering. `None` for an empty iterator.
pub fn mode<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for (&value, &count) in &counts {
        best = match best {
            None => Some((value, count)),
            Some((bv, bc)) if count > bc || (count == bc && value < bv) => {
                Some((value, count))
            }
            other => other,
        };
    }

    best.map(|(value, _)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_population_std() {
        // Variance of [2, 4, 4, 4, 5, 5, 7, 9] is 4.
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&values).unwrap();
        assert!((population_std(&values, m) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert!((quantile(&sorted, 0.25) - 1.75).abs() < 1e-12);
        assert!((quantile(&sorted, 0.5) - 2.5).abs() < 1e-12);
        assert!((quantile(&sorted, 0.75) - 3.25).abs() < 1e-12);
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
    }

    #[test]
    fn test_quantile_single_value() {
        assert_eq!(quantile(&[5.0], 0.25), 5.0);
    }

    #[test]
    fn test_mode_simple() {
        assert_eq!(mode(["a", "b", "a"]), Some("a".to_string()));
    }

    #[test]
    fn test_mode_tie_breaks_lexicographically() {
        // "b" is seen first, but "a" wins the tie.
        assert_eq!(mode(["b", "a", "b", "a"]), Some("a".to_string()));
    }

    #[test]
    fn test_mode_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(mode(empty), None);
    }
}
