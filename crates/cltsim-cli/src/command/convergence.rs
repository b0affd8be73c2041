use std::path::PathBuf;

use clap::Args;
use cltsim_analysis::convergence::ConvergenceSweep;

use super::args::SimulationArgs;
use crate::util::Output;

#[derive(Debug, Clone, Args)]
pub(crate) struct ConvergenceArg {
    #[clap(flatten)]
    pub simulation: SimulationArgs,

    /// Sample counts to sweep (comma-separated)
    #[arg(long, value_delimiter = ',', default_values_t = [1, 2, 5, 10, 20, 40, 100, 200])]
    pub sample_counts: Vec<usize>,

    /// Also write the sweep as JSON to this path (`-` for stdout only)
    #[arg(long)]
    pub json: Option<PathBuf>,
}

pub(crate) fn run(arg: &ConvergenceArg) -> anyhow::Result<()> {
    anyhow::ensure!(
        !arg.sample_counts.is_empty(),
        "at least one sample count is required"
    );
    let base = arg.simulation.resolve()?;
    let sweep = ConvergenceSweep::run(&base, &arg.sample_counts)?;

    if let Some(path) = &arg.json {
        let mut output = Output::from_output_path(Some(path.as_path()))?;
        output.write_json(&sweep)?;
        if !output.is_file() {
            return Ok(());
        }
        tracing::info!(path = %output.display_path(), "convergence sweep saved");
    }

    print_table(&sweep);
    Ok(())
}

fn print_table(sweep: &ConvergenceSweep) {
    println!(
        "CLT Convergence (rate={}, simulations={})",
        sweep.rate, sweep.simulation_count
    );
    println!("==========================================\n");
    println!(
        "{:>8} {:>10} {:>10} {:>10} {:>12} {:>12} {:>8}",
        "n", "Mean", "Expected", "Error", "Variance", "Expected", "Ratio"
    );
    println!("{}", "-".repeat(76));
    for row in &sweep.rows {
        println!(
            "{:>8} {:>10.4} {:>10.4} {:>+10.4} {:>12.6} {:>12.6} {:>8.3}",
            row.sample_count,
            row.mean,
            row.expected_mean,
            row.mean_error(),
            row.variance,
            row.expected_variance,
            row.variance_ratio()
        );
    }
}
