//! Descriptive statistics over plain number slices.
//!
//! Every function returns `None` instead of failing: the outputs feed a
//! report, and a statistic that cannot be computed is shown as blank.

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; the average of the two middle values for even lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Population standard deviation, `sqrt(mean((x - mean)^2))`.
///
/// `None` for fewer than two values.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Pearson correlation over paired observations, using population
/// covariance and standard deviations.
///
/// `None` when the slices differ in length, hold fewer than two pairs, or
/// either series has zero variance. The result is clamped to `[-1, 1]`.
pub fn correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len();
    if n < 2 || ys.len() != n {
        return None;
    }
    let mx = mean(xs)?;
    let my = mean(ys)?;
    let mut cov = 0.0;
    let mut sx = 0.0;
    let mut sy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        cov += dx * dy;
        sx += dx * dx;
        sy += dy * dy;
    }
    if sx == 0.0 || sy == 0.0 {
        return None;
    }
    let n = n as f64;
    let std_x = (sx / n).sqrt();
    let std_y = (sy / n).sqrt();
    Some(((cov / n) / (std_x * std_y)).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("value");
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn empty_inputs_are_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(median(&[]), None);
        assert_eq!(std_dev(&[]), None);
        assert_eq!(min(&[]), None);
        assert_eq!(max(&[]), None);
    }

    #[test]
    fn std_dev_needs_two_values() {
        assert_eq!(std_dev(&[5.0]), None);
        approx(std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 2.0);
    }

    #[test]
    fn median_odd_and_even() {
        approx(median(&[3.0, 1.0, 2.0]), 2.0);
        approx(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn mean_min_max() {
        approx(mean(&[80.0, 60.0, 90.0]), 230.0 / 3.0);
        approx(min(&[80.0, 60.0, 90.0]), 60.0);
        approx(max(&[80.0, 60.0, 90.0]), 90.0);
    }

    #[test]
    fn correlation_of_separated_series() {
        let r = correlation(&[10.0, 20.0, 30.0, 40.0], &[0.0, 0.0, 1.0, 1.0]).unwrap();
        assert!(r > 0.0 && r <= 1.0);
        approx(Some(r), 0.894_427_190_999_915_9);
    }

    #[test]
    fn correlation_degenerate_inputs() {
        assert_eq!(correlation(&[1.0], &[1.0]), None);
        assert_eq!(correlation(&[1.0, 2.0], &[1.0]), None);
        assert_eq!(correlation(&[5.0, 5.0, 5.0], &[0.0, 1.0, 1.0]), None);
        assert_eq!(correlation(&[1.0, 2.0, 3.0], &[1.0, 1.0, 1.0]), None);
    }

    #[test]
    fn perfect_negative_correlation() {
        approx(correlation(&[1.0, 2.0, 3.0], &[1.0, 0.5, 0.0]), -1.0);
    }
}
