//! CLT report command
//!
//! Runs the full analysis pipeline and prints the parameters, the sample-mean
//! summary against theory, a text histogram, the CDF distance, and the t-test
//! decision.

use std::path::PathBuf;

use clap::Args;
use cltsim_analysis::{
    pipeline::{self, AnalysisOptions},
    report::{CltReport, HistogramReport, SummaryComparison, TTestReport},
};
use cltsim_stats::ttest::TTestMethod;

use super::args::SimulationArgs;
use crate::util::Output;

const MAX_BAR_WIDTH: u64 = 50;

#[derive(Default, Debug, Clone, Args)]
pub(crate) struct ReportArg {
    #[clap(flatten)]
    pub simulation: SimulationArgs,

    /// Write the full report as JSON to this path (`-` for stdout only)
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// t-test variant: pooled or welch [default: pooled]
    #[arg(long)]
    pub method: Option<TTestMethod>,

    /// Significance level of the t-test [default: 0.05]
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Number of histogram bins [default: 30]
    #[arg(long)]
    pub bins: Option<usize>,

    /// Number of thresholds in the CDF grid [default: 101]
    #[arg(long)]
    pub grid_points: Option<usize>,
}

impl ReportArg {
    fn options(&self) -> anyhow::Result<AnalysisOptions> {
        let defaults = AnalysisOptions::default();
        let options = AnalysisOptions {
            cdf_grid_points: self.grid_points.unwrap_or(defaults.cdf_grid_points),
            histogram_bins: self.bins.unwrap_or(defaults.histogram_bins),
            method: self.method.unwrap_or(defaults.method),
            alpha: self.alpha.unwrap_or(defaults.alpha),
        };
        anyhow::ensure!(
            options.alpha > 0.0 && options.alpha < 1.0,
            "alpha must be between 0 and 1, got {}",
            options.alpha
        );
        Ok(options)
    }
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let params = arg.simulation.resolve()?;
    let options = arg.options()?;
    let report = pipeline::run(&params, &options)?;

    if let Some(path) = &arg.json {
        let mut output = Output::from_output_path(Some(path.as_path()))?;
        output.write_json(&report)?;
        if !output.is_file() {
            return Ok(());
        }
        tracing::info!(path = %output.display_path(), "report saved");
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &CltReport) {
    let params = &report.params;
    println!("CLT Simulation Report");
    println!("=====================\n");
    println!("Parameters:");
    println!("  Rate (lambda):     {}", params.rate);
    println!("  Samples per mean:  {}", params.sample_count);
    println!("  Simulations:       {}", params.simulation_count);
    println!("  Seed:              {}", params.seed);
    println!();

    print_summary(&report.summary);
    println!();

    print_histogram(&report.histogram);
    println!();

    println!("CDF Comparison:");
    println!(
        "  Max |empirical - normal| over {} thresholds: {:.4}",
        report.cdf.points.len(),
        report.cdf.max_abs_difference
    );
    println!();

    print_t_test(&report.t_test);
}

fn print_summary(summary: &SummaryComparison) {
    let empirical = &summary.empirical;
    println!("Sample Means vs Theory:");
    println!(
        "  {:<10} {:>12} {:>12} {:>12}",
        "", "Empirical", "Theoretical", "Difference"
    );
    println!(
        "  {:<10} {:>12.4} {:>12.4} {:>+12.4}",
        "Mean",
        empirical.mean,
        summary.theoretical_mean,
        summary.mean_error()
    );
    println!(
        "  {:<10} {:>12.4} {:>12.4} {:>+12.4}",
        "Variance",
        empirical.variance,
        summary.theoretical_variance,
        summary.variance_error()
    );
    println!(
        "  {:<10} {:>12.4} {:>12.4} {:>+12.4}",
        "Std Dev",
        empirical.std_dev,
        summary.theoretical_std_dev,
        empirical.std_dev - summary.theoretical_std_dev
    );
    println!(
        "  Variance ratio (empirical / theoretical): {:.3}",
        summary.variance_ratio()
    );
    println!(
        "  Range: {:.4} .. {:.4}, median {:.4}",
        empirical.min, empirical.max, empirical.median
    );

    let percentiles = summary
        .percentiles
        .iter()
        .map(|(p, v)| format!("P{p:02.0}={v:.4}"))
        .collect::<Vec<_>>();
    println!("  Percentiles: {}", percentiles.join(", "));
}

fn print_histogram(report: &HistogramReport) {
    let histogram = &report.histogram;
    println!(
        "Histogram of Sample Means (* marks population mean {:.4}):",
        report.population_mean
    );
    if histogram.bins.is_empty() {
        println!("  (no bins)");
        return;
    }
    let max_count = histogram.max_count().max(1);
    for (i, bin) in histogram.bins.iter().enumerate() {
        let bar_width = usize::try_from(bin.count * MAX_BAR_WIDTH / max_count).unwrap_or(0);
        let marker = if report.population_mean_bin == Some(i) {
            '*'
        } else {
            ' '
        };
        println!(
            "  {:>8.4} .. {:<8.4} {} {:>5} {}",
            bin.range.start,
            bin.range.end,
            marker,
            bin.count,
            "#".repeat(bar_width)
        );
    }
    if histogram.out_of_range > 0 {
        println!("  Out of range: {}", histogram.out_of_range);
    }
}

fn print_t_test(t_test: &TTestReport) {
    let result = &t_test.result;
    let method = match result.method {
        TTestMethod::Pooled => "pooled variance",
        TTestMethod::Welch => "Welch",
    };
    println!("Two-Sample t-Test ({method}):");
    println!(
        "  Empirical:   mean {:.4}, sd {:.4}, n {}",
        t_test.empirical.mean, t_test.empirical.std_dev, t_test.empirical.count
    );
    println!(
        "  Theoretical: mean {:.4}, sd {:.4}, n {}",
        t_test.theoretical.mean, t_test.theoretical.std_dev, t_test.theoretical.count
    );
    println!("  t = {:.4}", result.t_statistic);
    println!("  df = {:.1}", result.degrees_of_freedom);
    println!("  p-value = {:.4}", result.p_value);
    if t_test.rejects_null {
        println!(
            "  Decision: reject equal means at alpha = {} (sample means disagree with theory)",
            t_test.alpha
        );
    } else {
        println!(
            "  Decision: fail to reject equal means at alpha = {} (consistent with the CLT)",
            t_test.alpha
        );
    }
}
