use std::{fmt::Write as _, path::PathBuf};

use anyhow::Context;
use clap::Args;
use cltsim_engine::SimulationBatch;

use super::args::SimulationArgs;
use crate::util::Output;

#[derive(Default, Debug, Clone, Args)]
pub(crate) struct MeansArg {
    #[clap(flatten)]
    pub simulation: SimulationArgs,

    /// Output path (stdout if omitted or `-`)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &MeansArg) -> anyhow::Result<()> {
    let params = arg.simulation.resolve()?;
    let means = SimulationBatch::generate(&params)
        .context("Failed to generate simulation batch")?
        .sample_means();

    let mut content = String::new();
    for mean in means.iter() {
        writeln!(&mut content, "{mean}").context("Failed to format sample mean")?;
    }

    let mut output = Output::from_output_path(arg.output.as_deref())?;
    output.write_text(&content)?;
    tracing::info!(
        count = means.len(),
        output = %output.display_path(),
        "sample means written"
    );
    Ok(())
}
