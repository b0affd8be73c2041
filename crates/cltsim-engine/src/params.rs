use serde::{Deserialize, Serialize};

use crate::SimulationSeed;

/// Rejected simulation parameters.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ParamError {
    #[display("rate must be a positive finite number, got {rate}")]
    NonPositiveRate { rate: f64 },
    #[display("sample count must be at least 1")]
    ZeroSampleCount,
    #[display("simulation count must be at least 1")]
    ZeroSimulationCount,
    #[display(
        "batch of {simulation_count} simulations x {sample_count} samples does not fit in memory"
    )]
    BatchTooLarge {
        simulation_count: usize,
        sample_count: usize,
    },
}

/// Parameters of one simulation run.
///
/// Every field has a default, so a partial JSON object is a valid
/// configuration:
///
/// ```
/// use cltsim_engine::SimulationParams;
///
/// let params: SimulationParams = serde_json::from_str(r#"{ "rate": 0.5 }"#).unwrap();
/// assert_eq!(params.rate, 0.5);
/// assert_eq!(params.sample_count, 40);
/// assert_eq!(params.simulation_count, 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Rate `lambda` of the exponential distribution.
    pub rate: f64,
    /// Number of exponential draws averaged per simulation.
    pub sample_count: usize,
    /// Number of simulations, i.e. the length of the sample-mean vector.
    pub simulation_count: usize,
    pub seed: SimulationSeed,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            rate: Self::DEFAULT_RATE,
            sample_count: Self::DEFAULT_SAMPLE_COUNT,
            simulation_count: Self::DEFAULT_SIMULATION_COUNT,
            seed: SimulationSeed::DEFAULT,
        }
    }
}

impl SimulationParams {
    pub const DEFAULT_RATE: f64 = 0.2;
    pub const DEFAULT_SAMPLE_COUNT: usize = 40;
    pub const DEFAULT_SIMULATION_COUNT: usize = 1000;

    pub fn validate(&self) -> Result<(), ParamError> {
        if !(self.rate.is_finite() && self.rate > 0.0) {
            return Err(ParamError::NonPositiveRate { rate: self.rate });
        }
        if self.sample_count == 0 {
            return Err(ParamError::ZeroSampleCount);
        }
        if self.simulation_count == 0 {
            return Err(ParamError::ZeroSimulationCount);
        }
        self.batch_len()?;
        Ok(())
    }

    /// Total number of draws in a batch, `simulation_count * sample_count`.
    pub fn batch_len(&self) -> Result<usize, ParamError> {
        self.simulation_count
            .checked_mul(self.sample_count)
            .ok_or(ParamError::BatchTooLarge {
                simulation_count: self.simulation_count,
                sample_count: self.sample_count,
            })
    }

    /// Mean of `Exp(rate)`, `1 / rate`.
    #[must_use]
    pub fn population_mean(&self) -> f64 {
        self.rate.recip()
    }

    /// Standard deviation of `Exp(rate)`, which also equals `1 / rate`.
    #[must_use]
    pub fn population_std_dev(&self) -> f64 {
        self.rate.recip()
    }

    /// Standard deviation of a sample mean predicted by the CLT.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn expected_mean_std_dev(&self) -> f64 {
        self.population_std_dev() / (self.sample_count as f64).sqrt()
    }

    /// Variance of a sample mean predicted by the CLT, `1 / (rate^2 n)`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn expected_mean_variance(&self) -> f64 {
        1.0 / (self.rate * self.rate * self.sample_count as f64)
    }
}
