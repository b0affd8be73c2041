//! Two-sample t-test from summary statistics.
//!
//! Both samples are described only by `(mean, std_dev, count)`, which lets a
//! theoretical distribution stand in for one of the samples.
//!
//! # Methods
//!
//! - [`TTestMethod::Pooled`]: Student's test with a pooled variance estimate
//!   and `n_x + n_y - 2` degrees of freedom.
//! - [`TTestMethod::Welch`]: unequal variances, Welch-Satterthwaite degrees
//!   of freedom.
//!
//! The p-value is two-tailed, so swapping the samples negates the statistic
//! and leaves the p-value unchanged.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF as _, StudentsT};

/// Mean, standard deviation, and size of one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub count: usize,
}

impl SampleSummary {
    #[must_use]
    pub const fn new(mean: f64, std_dev: f64, count: usize) -> Self {
        Self {
            mean,
            std_dev,
            count,
        }
    }

    #[must_use]
    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }

    fn is_finite(&self) -> bool {
        self.mean.is_finite() && self.std_dev.is_finite() && self.std_dev >= 0.0
    }
}

#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum TTestMethod {
    /// Equal-variance test with a pooled standard deviation.
    #[default]
    Pooled,
    /// Unequal-variance test with Welch-Satterthwaite degrees of freedom.
    Welch,
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum TTestError {
    #[display(
        "not enough observations for a {method} t-test: {count_x} + {count_y} leaves no degrees of freedom"
    )]
    DegenerateDegreesOfFreedom {
        method: TTestMethod,
        count_x: usize,
        count_y: usize,
    },
    #[display("t-test inputs must have finite means and non-negative finite standard deviations")]
    NonFiniteInput,
    #[display("standard error of the mean difference is zero")]
    ZeroStandardError,
}

/// Result of a two-sample t-test.
///
/// # Examples
///
/// ```
/// use cltsim_stats::ttest::{SampleSummary, TTestMethod, TwoSampleTTest};
///
/// let x = SampleSummary::new(5.0, 0.8, 1000);
/// let y = SampleSummary::new(5.0, 0.79, 1000);
/// let test = TwoSampleTTest::new(&x, &y, TTestMethod::Pooled).unwrap();
/// assert_eq!(test.t_statistic, 0.0);
/// assert_eq!(test.degrees_of_freedom, 1998.0);
/// assert!((test.p_value - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TwoSampleTTest {
    pub method: TTestMethod,
    pub t_statistic: f64,
    pub degrees_of_freedom: f64,
    /// Two-tailed p-value in `[0, 1]`.
    pub p_value: f64,
}

impl TwoSampleTTest {
    /// Runs the test comparing the mean of `x` with the mean of `y`.
    #[expect(clippy::cast_precision_loss)]
    pub fn new(
        x: &SampleSummary,
        y: &SampleSummary,
        method: TTestMethod,
    ) -> Result<Self, TTestError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(TTestError::NonFiniteInput);
        }

        let degenerate = TTestError::DegenerateDegreesOfFreedom {
            method,
            count_x: x.count,
            count_y: y.count,
        };
        let nx = x.count as f64;
        let ny = y.count as f64;

        let (std_error, degrees_of_freedom) = match method {
            TTestMethod::Pooled => {
                if x.count == 0 || y.count == 0 || x.count + y.count <= 2 {
                    return Err(degenerate);
                }
                let df = nx + ny - 2.0;
                let pooled_sd =
                    (((nx - 1.0) * x.variance() + (ny - 1.0) * y.variance()) / df).sqrt();
                (pooled_sd * (1.0 / nx + 1.0 / ny).sqrt(), df)
            }
            TTestMethod::Welch => {
                if x.count < 2 || y.count < 2 {
                    return Err(degenerate);
                }
                let vx = x.variance() / nx;
                let vy = y.variance() / ny;
                let df = (vx + vy).powi(2) / (vx.powi(2) / (nx - 1.0) + vy.powi(2) / (ny - 1.0));
                ((vx + vy).sqrt(), df)
            }
        };

        if std_error <= 0.0 || !degrees_of_freedom.is_finite() {
            return Err(TTestError::ZeroStandardError);
        }

        let t_statistic = (x.mean - y.mean) / std_error;
        let p_value = two_tailed_p_value(t_statistic, degrees_of_freedom)?;

        Ok(Self {
            method,
            t_statistic,
            degrees_of_freedom,
            p_value,
        })
    }

    /// Whether the null hypothesis of equal means is rejected at `alpha`.
    #[must_use]
    pub fn rejects_null(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Two-tailed p-value of `t` under Student's t with `df` degrees of freedom.
///
/// ```
/// use cltsim_stats::ttest::two_tailed_p_value;
///
/// // t = 2.228 is the 97.5% quantile for df = 10
/// let p = two_tailed_p_value(2.228, 10.0).unwrap();
/// assert!((p - 0.05).abs() < 1e-3);
/// ```
pub fn two_tailed_p_value(t: f64, df: f64) -> Result<f64, TTestError> {
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|_| TTestError::NonFiniteInput)?;
    Ok((2.0 * dist.sf(t.abs())).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_pooled_known_value() {
        // Equal sizes and variances: sp = 1, se = sqrt(2 / 10), t = 1 / se
        let x = SampleSummary::new(1.0, 1.0, 10);
        let y = SampleSummary::new(0.0, 1.0, 10);
        let test = TwoSampleTTest::new(&x, &y, TTestMethod::Pooled).unwrap();
        assert_close(test.t_statistic, 1.0 / 0.2_f64.sqrt(), 1e-12);
        assert_eq!(test.degrees_of_freedom, 18.0);
        // Two-tailed p for t = 2.2361, df = 18
        assert_close(test.p_value, 0.0382, 1e-3);
    }

    #[test]
    fn test_pooled_unequal_variances() {
        let x = SampleSummary::new(10.0, 2.0, 5);
        let y = SampleSummary::new(8.0, 3.0, 9);
        let test = TwoSampleTTest::new(&x, &y, TTestMethod::Pooled).unwrap();
        let sp = ((4.0 * 4.0 + 8.0 * 9.0) / 12.0_f64).sqrt();
        let expected_t = 2.0 / (sp * (1.0 / 5.0 + 1.0 / 9.0_f64).sqrt());
        assert_close(test.t_statistic, expected_t, 1e-12);
    }

    #[test]
    fn test_welch_degrees_of_freedom() {
        let x = SampleSummary::new(10.0, 2.0, 5);
        let y = SampleSummary::new(8.0, 3.0, 9);
        let test = TwoSampleTTest::new(&x, &y, TTestMethod::Welch).unwrap();
        let vx = 4.0 / 5.0;
        let vy = 9.0 / 9.0;
        let df = (vx + vy) * (vx + vy) / (vx * vx / 4.0 + vy * vy / 8.0);
        assert_close(test.degrees_of_freedom, df, 1e-12);
        assert_close(test.t_statistic, 2.0 / (vx + vy).sqrt(), 1e-12);
    }

    #[test]
    fn test_swapping_inputs_keeps_p_value() {
        let x = SampleSummary::new(5.02, 0.79, 1000);
        let y = SampleSummary::new(5.0, 0.7906, 1000);
        for method in [TTestMethod::Pooled, TTestMethod::Welch] {
            let xy = TwoSampleTTest::new(&x, &y, method).unwrap();
            let yx = TwoSampleTTest::new(&y, &x, method).unwrap();
            assert_close(xy.t_statistic, -yx.t_statistic, 1e-12);
            assert_close(xy.p_value, yx.p_value, 1e-12);
        }
    }

    #[test]
    fn test_p_value_in_unit_interval() {
        for diff in [0.0, 0.01, 0.5, 3.0, 100.0] {
            let x = SampleSummary::new(diff, 1.0, 30);
            let y = SampleSummary::new(0.0, 1.0, 30);
            let test = TwoSampleTTest::new(&x, &y, TTestMethod::Pooled).unwrap();
            assert!((0.0..=1.0).contains(&test.p_value), "p = {}", test.p_value);
        }
    }

    #[test]
    fn test_large_difference_rejects_null() {
        let x = SampleSummary::new(6.0, 0.8, 1000);
        let y = SampleSummary::new(5.0, 0.8, 1000);
        let test = TwoSampleTTest::new(&x, &y, TTestMethod::Pooled).unwrap();
        assert!(test.rejects_null(0.05));
        assert!(test.p_value < 1e-10);
    }

    #[test]
    fn test_degenerate_degrees_of_freedom() {
        let one = SampleSummary::new(5.0, 0.0, 1);
        let err = TwoSampleTTest::new(&one, &one, TTestMethod::Pooled).unwrap_err();
        assert!(matches!(
            err,
            TTestError::DegenerateDegreesOfFreedom {
                count_x: 1,
                count_y: 1,
                ..
            }
        ));

        let two = SampleSummary::new(5.0, 1.0, 2);
        assert!(TwoSampleTTest::new(&two, &one, TTestMethod::Pooled).is_ok());
        assert!(TwoSampleTTest::new(&two, &one, TTestMethod::Welch).is_err());
    }

    #[test]
    fn test_zero_standard_error() {
        let x = SampleSummary::new(1.0, 0.0, 10);
        let err = TwoSampleTTest::new(&x, &x, TTestMethod::Pooled).unwrap_err();
        assert_eq!(err, TTestError::ZeroStandardError);
    }

    #[test]
    fn test_non_finite_input() {
        let x = SampleSummary::new(f64::NAN, 1.0, 10);
        let y = SampleSummary::new(0.0, 1.0, 10);
        let err = TwoSampleTTest::new(&x, &y, TTestMethod::Pooled).unwrap_err();
        assert_eq!(err, TTestError::NonFiniteInput);
    }

    #[test]
    fn test_method_parses_from_str() {
        assert_eq!("Pooled".parse::<TTestMethod>().unwrap(), TTestMethod::Pooled);
        assert_eq!("Welch".parse::<TTestMethod>().unwrap(), TTestMethod::Welch);
        assert_eq!(TTestMethod::Welch.to_string(), "Welch");
    }

    #[test]
    fn test_error_message_mentions_counts() {
        let one = SampleSummary::new(0.0, 1.0, 1);
        let err = TwoSampleTTest::new(&one, &one, TTestMethod::Pooled).unwrap_err();
        assert_eq!(
            err.to_string(),
            "not enough observations for a Pooled t-test: 1 + 1 leaves no degrees of freedom"
        );
    }
}
