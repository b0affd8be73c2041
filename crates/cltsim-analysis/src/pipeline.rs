//! The five-stage CLT analysis pipeline.
//!
//! 1. Validate parameters
//! 2. Generate the simulation batch
//! 3. Reduce rows to sample means
//! 4. Summarize the sample means against the CLT prediction
//! 5. Compare empirical and theoretical distributions (ECDF grid and t-test)
//!
//! Each stage consumes the previous stage's output; nothing runs
//! concurrently and nothing is retried.

use cltsim_engine::{ParamError, SimulationBatch, SimulationParams, TheoreticalDistribution};
use cltsim_stats::{
    descriptive::DescriptiveStats,
    ecdf::{EmpiricalCdf, linspace},
    histogram::Histogram,
    percentiles::Percentiles,
    ttest::{SampleSummary, TTestError, TTestMethod, TwoSampleTTest},
};
use serde::{Deserialize, Serialize};

use crate::report::{
    CdfComparison, CdfPoint, CltReport, HistogramReport, SummaryComparison, TTestReport,
};

/// Percentiles of the sample means included in every report.
pub const REPORT_PERCENTILES: [f64; 5] = [5.0, 25.0, 50.0, 75.0, 95.0];

/// Half-width of the CDF grid around the population mean, in theoretical
/// standard deviations.
const CDF_GRID_SIGMAS: f64 = 4.0;

#[derive(
    Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum AnalysisError {
    #[display("invalid simulation parameters: {_0}")]
    Params(ParamError),
    #[display(
        "at least 2 simulations are required to estimate the variance of the sample means and run the t-test, got {simulations}"
    )]
    #[from(ignore)]
    InsufficientSimulations { simulations: usize },
    #[display("t-test failed: {_0}")]
    TTest(TTestError),
}

/// Tunable parts of the analysis that do not affect the simulated data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Number of thresholds in the CDF comparison grid.
    pub cdf_grid_points: usize,
    /// Number of histogram bins.
    pub histogram_bins: usize,
    pub method: TTestMethod,
    /// Significance level for the t-test decision.
    pub alpha: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            cdf_grid_points: 101,
            histogram_bins: 30,
            method: TTestMethod::Pooled,
            alpha: 0.05,
        }
    }
}

/// Runs the full pipeline for `params`.
///
/// # Example
///
/// ```
/// use cltsim_analysis::pipeline::{self, AnalysisOptions};
/// use cltsim_engine::SimulationParams;
///
/// let report = pipeline::run(&SimulationParams::default(), &AnalysisOptions::default()).unwrap();
/// assert_eq!(report.sample_means.len(), 1000);
/// assert!((0.0..=1.0).contains(&report.t_test.result.p_value));
/// ```
pub fn run(
    params: &SimulationParams,
    options: &AnalysisOptions,
) -> Result<CltReport, AnalysisError> {
    params.validate()?;
    if params.simulation_count < 2 {
        return Err(AnalysisError::InsufficientSimulations {
            simulations: params.simulation_count,
        });
    }
    tracing::debug!(?params, ?options, "starting CLT analysis");

    let batch = SimulationBatch::generate(params)?;
    let sample_means = batch.sample_means();
    tracing::debug!(count = sample_means.len(), "reduced batch to sample means");

    let mut sorted = sample_means.as_slice().to_vec();
    sorted.sort_by(f64::total_cmp);
    let theory = TheoreticalDistribution::new(params)?;
    let summary = summarize(&sorted, &theory)?;
    tracing::debug!(
        mean = summary.empirical.mean,
        variance = summary.empirical.variance,
        "summarized sample means"
    );

    let histogram = build_histogram(&sorted, options.histogram_bins, params.population_mean());
    let cdf = compare_cdf(&sorted, &theory, options.cdf_grid_points);
    let t_test = compare_means(&summary, &theory, options)?;

    tracing::info!(
        mean = summary.empirical.mean,
        variance = summary.empirical.variance,
        t = t_test.result.t_statistic,
        p = t_test.result.p_value,
        "CLT analysis completed"
    );

    Ok(CltReport {
        params: *params,
        summary,
        histogram,
        cdf,
        t_test,
        sample_means,
    })
}

fn summarize(
    sorted_means: &[f64],
    theory: &TheoreticalDistribution,
) -> Result<SummaryComparison, AnalysisError> {
    let empirical = DescriptiveStats::from_sorted(sorted_means).ok_or(
        AnalysisError::InsufficientSimulations {
            simulations: sorted_means.len(),
        },
    )?;
    Ok(SummaryComparison {
        empirical,
        percentiles: Percentiles::from_sorted(sorted_means, &REPORT_PERCENTILES),
        theoretical_mean: theory.mean(),
        theoretical_variance: theory.variance(),
        theoretical_std_dev: theory.std_dev(),
    })
}

fn build_histogram(sorted_means: &[f64], bins: usize, population_mean: f64) -> HistogramReport {
    let histogram = Histogram::new(sorted_means, bins, None);
    let population_mean_bin = histogram.bin_index(population_mean);
    HistogramReport {
        histogram,
        population_mean,
        population_mean_bin,
    }
}

/// Samples both CDFs on a grid covering the data and `mean +/- 4 sd`.
fn compare_cdf(
    sorted_means: &[f64],
    theory: &TheoreticalDistribution,
    grid_points: usize,
) -> CdfComparison {
    let Some(ecdf) = EmpiricalCdf::new(sorted_means.iter().copied()) else {
        return CdfComparison {
            points: vec![],
            max_abs_difference: 0.0,
        };
    };

    let spread = CDF_GRID_SIGMAS * theory.std_dev();
    let start = f64::min(ecdf.min(), theory.mean() - spread);
    // Past the largest mean so the last point reaches 1
    let end = f64::max(ecdf.max().next_up(), theory.mean() + spread);
    let grid = linspace(start, end, grid_points);

    let points = grid
        .iter()
        .zip(ecdf.eval_many(&grid))
        .zip(theory.cdf_many(&grid))
        .map(|((&threshold, empirical), theoretical)| CdfPoint {
            threshold,
            empirical,
            theoretical,
        })
        .collect::<Vec<_>>();
    let max_abs_difference = ecdf.max_abs_difference(|x| theory.cdf(x), &grid);

    CdfComparison {
        points,
        max_abs_difference,
    }
}

/// Tests the sample means against the normal approximation treated as a
/// sample of the same size.
fn compare_means(
    summary: &SummaryComparison,
    theory: &TheoreticalDistribution,
    options: &AnalysisOptions,
) -> Result<TTestReport, AnalysisError> {
    let stats = &summary.empirical;
    let empirical = SampleSummary::new(stats.mean, stats.std_dev, stats.count);
    let theoretical = SampleSummary::new(theory.mean(), theory.std_dev(), stats.count);
    let result = TwoSampleTTest::new(&empirical, &theoretical, options.method)?;
    Ok(TTestReport {
        empirical,
        theoretical,
        result,
        alpha: options.alpha,
        rejects_null: result.rejects_null(options.alpha),
    })
}

#[cfg(test)]
mod tests {
    use cltsim_engine::SimulationSeed;

    use super::*;

    fn params(simulation_count: usize, seed: u64) -> SimulationParams {
        SimulationParams {
            simulation_count,
            seed: SimulationSeed::new(seed),
            ..SimulationParams::default()
        }
    }

    #[test]
    fn test_default_scenario_matches_clt() {
        let report = run(&SimulationParams::default(), &AnalysisOptions::default()).unwrap();
        let summary = &report.summary;
        assert!((summary.empirical.mean - 5.0).abs() < 0.1, "{summary:?}");
        assert!((summary.empirical.variance - 0.625).abs() < 0.05, "{summary:?}");
        assert!(report.t_test.result.p_value > 0.05, "{:?}", report.t_test);
        assert!(!report.t_test.rejects_null);
        assert_eq!(report.t_test.result.degrees_of_freedom, 1998.0);
    }

    #[test]
    fn test_variance_converges_across_seeds() {
        const RUNS: u32 = 20;
        let (mean_sum, variance_sum) = (0..u64::from(RUNS))
            .map(|seed| run(&params(1000, seed), &AnalysisOptions::default()).unwrap())
            .fold((0.0, 0.0), |(m, v), report| {
                (m + report.summary.empirical.mean, v + report.summary.empirical.variance)
            });
        assert!((mean_sum / f64::from(RUNS) - 5.0).abs() < 0.02);
        assert!((variance_sum / f64::from(RUNS) - 0.625).abs() < 0.03);
    }

    #[test]
    fn test_reproducible_for_fixed_seed() {
        let a = run(&params(200, 9), &AnalysisOptions::default()).unwrap();
        let b = run(&params(200, 9), &AnalysisOptions::default()).unwrap();
        assert_eq!(a.sample_means, b.sample_means);
        assert_eq!(a.summary.empirical, b.summary.empirical);
        assert_eq!(a.t_test.result, b.t_test.result);
        assert_eq!(a.cdf.points, b.cdf.points);
    }

    #[test]
    fn test_single_simulation_is_rejected() {
        let err = run(&params(1, 0), &AnalysisOptions::default()).unwrap_err();
        assert_eq!(err, AnalysisError::InsufficientSimulations { simulations: 1 });
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        let bad = SimulationParams {
            rate: 0.0,
            ..SimulationParams::default()
        };
        let err = run(&bad, &AnalysisOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Params(ParamError::NonPositiveRate { .. })
        ));
    }

    #[test]
    fn test_cdf_grid_shape() {
        let options = AnalysisOptions {
            cdf_grid_points: 51,
            ..AnalysisOptions::default()
        };
        let report = run(&params(300, 1), &options).unwrap();
        let points = &report.cdf.points;
        assert_eq!(points.len(), 51);
        assert_eq!(points[0].empirical, 0.0);
        assert_eq!(points[50].empirical, 1.0);
        assert!(points.windows(2).all(|w| w[0].empirical <= w[1].empirical));
        assert!(points.windows(2).all(|w| w[0].theoretical <= w[1].theoretical));
        assert!(report.cdf.max_abs_difference < 0.2);
    }

    #[test]
    fn test_histogram_marks_population_mean() {
        let report = run(&SimulationParams::default(), &AnalysisOptions::default()).unwrap();
        let histogram = &report.histogram;
        assert_eq!(histogram.histogram.bins.len(), 30);
        assert_eq!(histogram.histogram.total_count(), 1000);
        let bin = histogram.population_mean_bin.unwrap();
        assert!(histogram.histogram.bins[bin].range.contains(&5.0));
    }

    #[test]
    fn test_welch_method_is_used() {
        let options = AnalysisOptions {
            method: TTestMethod::Welch,
            ..AnalysisOptions::default()
        };
        let report = run(&params(500, 3), &options).unwrap();
        assert_eq!(report.t_test.result.method, TTestMethod::Welch);
        assert!((0.0..=1.0).contains(&report.t_test.result.p_value));
    }

    #[test]
    fn test_report_serializes() {
        let report = run(&params(50, 5), &AnalysisOptions::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["t_test"]["p_value"].is_f64());
        assert_eq!(json["t_test"]["method"], "pooled");
        assert_eq!(json["params"]["simulation_count"], 50);
        assert!(json.get("sample_means").is_none());
    }
}
