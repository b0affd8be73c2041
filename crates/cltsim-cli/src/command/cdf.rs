use std::{fmt::Write as _, path::PathBuf};

use anyhow::Context;
use clap::Args;
use cltsim_analysis::{
    pipeline::{self, AnalysisOptions},
    report::CdfPoint,
};

use super::args::SimulationArgs;
use crate::util::Output;

#[derive(Default, Debug, Clone, Args)]
pub(crate) struct CdfArg {
    #[clap(flatten)]
    pub simulation: SimulationArgs,

    /// Number of thresholds in the CDF grid [default: 101]
    #[arg(long)]
    pub grid_points: Option<usize>,

    /// Output CSV path (stdout if omitted or `-`)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &CdfArg) -> anyhow::Result<()> {
    let params = arg.simulation.resolve()?;
    let defaults = AnalysisOptions::default();
    let options = AnalysisOptions {
        cdf_grid_points: arg.grid_points.unwrap_or(defaults.cdf_grid_points),
        ..defaults
    };
    let report = pipeline::run(&params, &options)?;

    let csv_content = format_csv(&report.cdf.points)?;
    let mut output = Output::from_output_path(arg.output.as_deref())?;
    output.write_text(&csv_content)?;
    tracing::info!(
        points = report.cdf.points.len(),
        max_abs_difference = report.cdf.max_abs_difference,
        output = %output.display_path(),
        "CDF grid written"
    );
    Ok(())
}

fn format_csv(points: &[CdfPoint]) -> anyhow::Result<String> {
    let mut csv_content = String::from("threshold,empirical,theoretical\n");
    for point in points {
        writeln!(
            &mut csv_content,
            "{},{},{}",
            point.threshold, point.empirical, point.theoretical
        )
        .with_context(|| format!("Failed to write CSV row for threshold {}", point.threshold))?;
    }
    Ok(csv_content)
}
