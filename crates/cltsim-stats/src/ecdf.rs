//! Empirical cumulative distribution function.
//!
//! The ECDF of a sample `x_1..x_n` is `F_n(t) = #{ x_i < t } / n`. Strict
//! inequality is used, so `F_n(min) = 0` and `F_n(t) = 1` only once `t`
//! exceeds the maximum.

/// Empirical CDF over a fixed set of observations.
///
/// # Examples
///
/// ```
/// use cltsim_stats::ecdf::EmpiricalCdf;
///
/// let ecdf = EmpiricalCdf::new([3.0, 1.0, 2.0, 4.0]).unwrap();
/// assert_eq!(ecdf.eval(0.0), 0.0);
/// assert_eq!(ecdf.eval(1.0), 0.0);
/// assert_eq!(ecdf.eval(2.5), 0.5);
/// assert_eq!(ecdf.eval(10.0), 1.0);
/// assert_eq!(ecdf.eval_many(&[1.5, 3.5]), vec![0.25, 0.75]);
/// ```
#[derive(Debug, Clone)]
pub struct EmpiricalCdf {
    sorted: Vec<f64>,
}

impl EmpiricalCdf {
    /// Builds an ECDF from unsorted observations.
    ///
    /// Returns `None` if there are no observations or any observation is NaN
    /// or infinite.
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        if sorted.is_empty() || !sorted.iter().all(|v| v.is_finite()) {
            return None;
        }
        sorted.sort_by(f64::total_cmp);
        Some(Self { sorted })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Smallest observation.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.sorted[0]
    }

    /// Largest observation.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.sorted[self.sorted.len() - 1]
    }

    /// Fraction of observations strictly less than `threshold`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn eval(&self, threshold: f64) -> f64 {
        let below = self.sorted.partition_point(|&v| v < threshold);
        below as f64 / self.sorted.len() as f64
    }

    /// Evaluates the ECDF at every threshold.
    #[must_use]
    pub fn eval_many(&self, thresholds: &[f64]) -> Vec<f64> {
        thresholds.iter().map(|&t| self.eval(t)).collect()
    }

    /// Largest absolute gap between this ECDF and `reference` over `grid`.
    ///
    /// Returns `0.0` for an empty grid.
    ///
    /// ```
    /// use cltsim_stats::ecdf::EmpiricalCdf;
    ///
    /// let ecdf = EmpiricalCdf::new([0.25, 0.75]).unwrap();
    /// let uniform = |x: f64| x.clamp(0.0, 1.0);
    /// let distance = ecdf.max_abs_difference(uniform, &[0.0, 0.5, 1.0]);
    /// assert_eq!(distance, 0.0);
    /// ```
    #[must_use]
    pub fn max_abs_difference<F>(&self, reference: F, grid: &[f64]) -> f64
    where
        F: Fn(f64) -> f64,
    {
        grid.iter()
            .map(|&t| (self.eval(t) - reference(t)).abs())
            .fold(0.0, f64::max)
    }
}

/// Evenly spaced thresholds covering `[start, end]`, both ends included.
///
/// Returns `[start]` when fewer than two points are requested.
///
/// ```
/// use cltsim_stats::ecdf::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    if points < 2 {
        return vec![start];
    }
    let step = (end - start) / (points - 1) as f64;
    (0..points)
        .map(|i| {
            if i == points - 1 {
                end
            } else {
                start + i as f64 * step
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_observations() {
        assert!(EmpiricalCdf::new(Vec::new()).is_none());
    }

    #[test]
    fn test_non_finite_observations_are_rejected() {
        assert!(EmpiricalCdf::new([1.0, f64::NAN, 2.0]).is_none());
        assert!(EmpiricalCdf::new([-f64::NAN, 1.0]).is_none());
        assert!(EmpiricalCdf::new([f64::INFINITY]).is_none());
    }

    #[test]
    fn test_limits() {
        let ecdf = EmpiricalCdf::new([5.0, -2.0, 7.5]).unwrap();
        assert_eq!(ecdf.eval(f64::NEG_INFINITY), 0.0);
        assert_eq!(ecdf.eval(f64::INFINITY), 1.0);
        assert_eq!(ecdf.eval(ecdf.min()), 0.0);
        assert_eq!(ecdf.eval(ecdf.max().next_up()), 1.0);
    }

    #[test]
    fn test_monotone_non_decreasing() {
        let values = (0..200).map(|i| f64::from((i * 37) % 101) / 7.0);
        let ecdf = EmpiricalCdf::new(values).unwrap();
        let grid = linspace(-1.0, 16.0, 500);
        let cdf = ecdf.eval_many(&grid);
        assert!(cdf.windows(2).all(|w| w[0] <= w[1]));
        assert!(cdf.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_ties_are_excluded_at_threshold() {
        let ecdf = EmpiricalCdf::new([1.0, 2.0, 2.0, 2.0, 3.0]).unwrap();
        assert_eq!(ecdf.eval(2.0), 0.2);
        assert_eq!(ecdf.eval(2.0_f64.next_up()), 0.8);
    }

    #[test]
    fn test_max_abs_difference_against_constant() {
        let ecdf = EmpiricalCdf::new([0.0, 1.0]).unwrap();
        let distance = ecdf.max_abs_difference(|_| 0.5, &[-1.0, 0.5, 2.0]);
        assert_eq!(distance, 0.5);
        assert_eq!(ecdf.max_abs_difference(|_| 0.5, &[]), 0.0);
    }

    #[test]
    fn test_linspace_endpoints() {
        let grid = linspace(4.3, 5.9, 101);
        assert_eq!(grid.len(), 101);
        assert_eq!(grid[0], 4.3);
        assert_eq!(grid[100], 5.9);
    }
}
