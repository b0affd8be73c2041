use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{
    cdf::CdfArg, convergence::ConvergenceArg, means::MeansArg, report::ReportArg,
};

mod args;
mod cdf;
mod convergence;
mod means;
mod report;

const DEFAULT_LOG_FILTER: &str = "cltsim=info,cltsim_analysis=info,cltsim_engine=info";
const VERBOSE_LOG_FILTER: &str = "cltsim=debug,cltsim_analysis=debug,cltsim_engine=debug";

#[derive(Debug, Clone, Parser)]
#[command(name = "cltsim", author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log pipeline stages at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Run the CLT analysis and print a text report
    Report(#[clap(flatten)] ReportArg),
    /// Write the empirical and theoretical CDF grid as CSV
    Cdf(#[clap(flatten)] CdfArg),
    /// Write the sample means, one per line
    Means(#[clap(flatten)] MeansArg),
    /// Compare sample-mean statistics with theory over several sample counts
    Convergence(#[clap(flatten)] ConvergenceArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(args.verbose);
    match args.mode.unwrap_or(Mode::Report(ReportArg::default())) {
        Mode::Report(arg) => report::run(&arg)?,
        Mode::Cdf(arg) => cdf::run(&arg)?,
        Mode::Means(arg) => means::run(&arg)?,
        Mode::Convergence(arg) => convergence::run(&arg)?,
    }
    Ok(())
}

/// Logs go to stderr so report, CSV, and JSON output on stdout stay clean.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            VERBOSE_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
