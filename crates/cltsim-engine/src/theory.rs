use statrs::distribution::{ContinuousCDF as _, Normal};

use crate::{ParamError, SimulationParams};

/// Normal approximation of the sample-mean distribution predicted by the CLT.
///
/// For draws from `Exp(rate)` averaged over `n` samples, the sample mean is
/// approximately `Normal(1 / rate, (1 / rate) / sqrt(n))`.
///
/// # Example
///
/// ```
/// use cltsim_engine::{SimulationParams, TheoreticalDistribution};
///
/// let theory = TheoreticalDistribution::new(&SimulationParams::default()).unwrap();
/// assert!((theory.mean() - 5.0).abs() < 1e-12);
/// assert!((theory.variance() - 0.625).abs() < 1e-12);
/// assert!((theory.cdf(5.0) - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TheoreticalDistribution {
    mean: f64,
    std_dev: f64,
    normal: Normal,
}

impl TheoreticalDistribution {
    pub fn new(params: &SimulationParams) -> Result<Self, ParamError> {
        params.validate()?;
        let mean = params.population_mean();
        let std_dev = params.expected_mean_std_dev();
        let normal = Normal::new(mean, std_dev)
            .map_err(|_| ParamError::NonPositiveRate { rate: params.rate })?;
        Ok(Self {
            mean,
            std_dev,
            normal,
        })
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    #[must_use]
    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }

    /// Probability that a sample mean is below `x`.
    #[must_use]
    pub fn cdf(&self, x: f64) -> f64 {
        self.normal.cdf(x)
    }

    #[must_use]
    pub fn cdf_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.cdf(x)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_follow_rate_and_sample_count() {
        let params = SimulationParams {
            rate: 2.0,
            sample_count: 100,
            ..SimulationParams::default()
        };
        let theory = TheoreticalDistribution::new(&params).unwrap();
        assert!((theory.mean() - 0.5).abs() < 1e-12);
        assert!((theory.std_dev() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_cdf_symmetry_and_limits() {
        let theory = TheoreticalDistribution::new(&SimulationParams::default()).unwrap();
        let sd = theory.std_dev();
        let below = theory.cdf(5.0 - 1.5 * sd);
        let above = theory.cdf(5.0 + 1.5 * sd);
        assert!((below + above - 1.0).abs() < 1e-9);
        assert!(theory.cdf(-1e9) < 1e-12);
        assert!((theory.cdf(1e9) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_one_sigma_probability() {
        let theory = TheoreticalDistribution::new(&SimulationParams::default()).unwrap();
        let (mean, sd) = (theory.mean(), theory.std_dev());
        let cdf = theory.cdf_many(&[mean - sd, mean + sd]);
        assert!((cdf[1] - cdf[0] - 0.682_689).abs() < 1e-5);
    }

    #[test]
    fn test_rejects_invalid_params() {
        let params = SimulationParams {
            rate: -1.0,
            ..SimulationParams::default()
        };
        assert!(TheoreticalDistribution::new(&params).is_err());
    }
}
