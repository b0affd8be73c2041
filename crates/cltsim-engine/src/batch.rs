use rand::{Rng as _, SeedableRng as _};
use rand_distr::Exp;
use rand_pcg::Pcg32;

use crate::{ParamError, SimulationParams};

/// Matrix of exponential draws, one row per simulation.
///
/// Values are stored row-major. The batch is immutable once generated.
///
/// # Example
///
/// ```
/// use cltsim_engine::{SimulationBatch, SimulationParams};
///
/// let params = SimulationParams {
///     simulation_count: 3,
///     sample_count: 4,
///     ..SimulationParams::default()
/// };
/// let batch = SimulationBatch::generate(&params).unwrap();
/// assert_eq!(batch.rows().count(), 3);
/// assert!(batch.rows().all(|row| row.len() == 4));
/// assert_eq!(batch.sample_means().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationBatch {
    sample_count: usize,
    values: Vec<f64>,
}

impl SimulationBatch {
    /// Draws `simulation_count x sample_count` values from `Exp(rate)`.
    ///
    /// The generator is seeded from `params.seed`, so identical parameters
    /// reproduce the batch exactly.
    pub fn generate(params: &SimulationParams) -> Result<Self, ParamError> {
        params.validate()?;
        let len = params.batch_len()?;
        let exp = Exp::new(params.rate).map_err(|_| ParamError::NonPositiveRate {
            rate: params.rate,
        })?;

        let rng = Pcg32::seed_from_u64(params.seed.value());
        let values = rng.sample_iter(exp).take(len).collect::<Vec<_>>();

        tracing::debug!(
            simulations = params.simulation_count,
            samples = params.sample_count,
            seed = %params.seed,
            "generated simulation batch"
        );

        Ok(Self {
            sample_count: params.sample_count,
            values,
        })
    }

    #[must_use]
    pub fn simulation_count(&self) -> usize {
        self.values.len() / self.sample_count
    }

    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// All draws in row-major order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Draws of the `index`-th simulation, if it exists.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.values.chunks_exact(self.sample_count).nth(index)
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.values.chunks_exact(self.sample_count)
    }

    /// Reduces each simulation to the arithmetic mean of its draws.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn sample_means(&self) -> SampleMeans {
        let n = self.sample_count as f64;
        SampleMeans(self.rows().map(|row| row.iter().sum::<f64>() / n).collect())
    }
}

/// One sample mean per simulation, in simulation order.
#[derive(Debug, Clone, PartialEq, derive_more::Deref, derive_more::IntoIterator)]
pub struct SampleMeans(Vec<f64>);

impl SampleMeans {
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}
