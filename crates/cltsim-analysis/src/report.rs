//! Serializable results of a CLT analysis run.
//!
//! Every section is plain data so the CLI can print it as text or write it as
//! JSON without recomputing anything.

use cltsim_engine::{SampleMeans, SimulationParams};
use cltsim_stats::{
    descriptive::DescriptiveStats,
    histogram::Histogram,
    percentiles::Percentiles,
    ttest::{SampleSummary, TwoSampleTTest},
};
use serde::Serialize;

/// Full output of [`crate::pipeline::run`].
#[derive(Debug, Clone, Serialize)]
pub struct CltReport {
    pub params: SimulationParams,
    pub summary: SummaryComparison,
    pub histogram: HistogramReport,
    pub cdf: CdfComparison,
    pub t_test: TTestReport,
    /// The sample-mean vector the report was computed from.
    #[serde(skip)]
    pub sample_means: SampleMeans,
}

/// Empirical statistics of the sample means next to the CLT predictions.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryComparison {
    pub empirical: DescriptiveStats,
    pub percentiles: Percentiles,
    pub theoretical_mean: f64,
    pub theoretical_variance: f64,
    pub theoretical_std_dev: f64,
}

impl SummaryComparison {
    /// Empirical mean minus the population mean.
    #[must_use]
    pub fn mean_error(&self) -> f64 {
        self.empirical.mean - self.theoretical_mean
    }

    /// Empirical variance minus the predicted variance.
    #[must_use]
    pub fn variance_error(&self) -> f64 {
        self.empirical.variance - self.theoretical_variance
    }

    /// Empirical variance as a fraction of the predicted variance.
    #[must_use]
    pub fn variance_ratio(&self) -> f64 {
        self.empirical.variance / self.theoretical_variance
    }
}

/// Histogram of the sample means with the population-mean marker.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramReport {
    pub histogram: Histogram,
    pub population_mean: f64,
    /// Bin holding the population mean, `None` if it falls outside the range.
    pub population_mean_bin: Option<usize>,
}

/// Empirical CDF of the sample means sampled against the normal CDF.
#[derive(Debug, Clone, Serialize)]
pub struct CdfComparison {
    pub points: Vec<CdfPoint>,
    /// Largest `|empirical - theoretical|` over `points`.
    pub max_abs_difference: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CdfPoint {
    pub threshold: f64,
    pub empirical: f64,
    pub theoretical: f64,
}

/// Two-sample t-test of the sample means against the normal approximation.
#[derive(Debug, Clone, Serialize)]
pub struct TTestReport {
    pub empirical: SampleSummary,
    pub theoretical: SampleSummary,
    #[serde(flatten)]
    pub result: TwoSampleTTest,
    pub alpha: f64,
    /// `true` if the sample means are inconsistent with the CLT prediction at
    /// level `alpha`.
    pub rejects_null: bool,
}
