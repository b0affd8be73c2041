//! CLT convergence check over increasing sample counts.
//!
//! As the number of draws per simulation grows, the mean of the sample means
//! should stay near `1 / rate` and their variance should track
//! `1 / (rate^2 n)`. The sweep reruns the generator and aggregator for each
//! requested sample count with the same seed and simulation count.

use cltsim_engine::{SimulationBatch, SimulationParams};
use cltsim_stats::descriptive::DescriptiveStats;
use serde::Serialize;

use crate::pipeline::AnalysisError;

/// One row of a convergence sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConvergenceRow {
    pub sample_count: usize,
    pub mean: f64,
    pub variance: f64,
    pub expected_mean: f64,
    pub expected_variance: f64,
}

impl ConvergenceRow {
    #[must_use]
    pub fn mean_error(&self) -> f64 {
        self.mean - self.expected_mean
    }

    /// Empirical variance divided by the CLT prediction; approaches 1.
    #[must_use]
    pub fn variance_ratio(&self) -> f64 {
        self.variance / self.expected_variance
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConvergenceSweep {
    pub rate: f64,
    pub simulation_count: usize,
    pub rows: Vec<ConvergenceRow>,
}

impl ConvergenceSweep {
    /// Runs the sweep for each entry of `sample_counts`, in order.
    ///
    /// `base` supplies the rate, simulation count, and seed; its own sample
    /// count is ignored.
    pub fn run(base: &SimulationParams, sample_counts: &[usize]) -> Result<Self, AnalysisError> {
        let rows = sample_counts
            .iter()
            .map(|&sample_count| {
                let params = SimulationParams {
                    sample_count,
                    ..*base
                };
                sweep_row(&params)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rate: base.rate,
            simulation_count: base.simulation_count,
            rows,
        })
    }
}

fn sweep_row(params: &SimulationParams) -> Result<ConvergenceRow, AnalysisError> {
    let means = SimulationBatch::generate(params)?.sample_means();
    let stats = DescriptiveStats::new(means).ok_or(AnalysisError::InsufficientSimulations {
        simulations: params.simulation_count,
    })?;
    tracing::debug!(
        sample_count = params.sample_count,
        mean = stats.mean,
        variance = stats.variance,
        "convergence sweep row"
    );
    Ok(ConvergenceRow {
        sample_count: params.sample_count,
        mean: stats.mean,
        variance: stats.variance,
        expected_mean: params.population_mean(),
        expected_variance: params.expected_mean_variance(),
    })
}
