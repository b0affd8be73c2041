//! Simulation arguments shared by every subcommand.

use std::{num::ParseIntError, path::PathBuf, str::FromStr};

use anyhow::Context;
use clap::Args;
use cltsim_engine::{SimulationParams, SimulationSeed};
use rand::Rng as _;

use crate::util;

/// `--seed` value: a fixed seed or a fresh random one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SeedArg {
    Fixed(SimulationSeed),
    Random,
}

impl FromStr for SeedArg {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("random") {
            return Ok(SeedArg::Random);
        }
        s.parse().map(SeedArg::Fixed)
    }
}

impl SeedArg {
    fn resolve(self) -> SimulationSeed {
        match self {
            SeedArg::Fixed(seed) => seed,
            SeedArg::Random => rand::rng().random(),
        }
    }
}

/// Flags override the config file, which overrides the built-in defaults.
#[derive(Default, Debug, Clone, Args)]
pub(crate) struct SimulationArgs {
    /// Rate of the exponential distribution [default: 0.2]
    #[arg(long)]
    pub rate: Option<f64>,
    /// Exponential draws averaged per simulation [default: 40]
    #[arg(long = "samples")]
    pub sample_count: Option<usize>,
    /// Number of simulations [default: 1000]
    #[arg(long = "simulations")]
    pub simulation_count: Option<usize>,
    /// Seed as a decimal or 0x-prefixed hex integer, or `random` [default: 20170318]
    #[arg(long)]
    pub seed: Option<SeedArg>,
    /// JSON file with default simulation parameters
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SimulationArgs {
    pub(crate) fn resolve(&self) -> anyhow::Result<SimulationParams> {
        let base = match &self.config {
            Some(path) => util::read_params_file(path)?,
            None => SimulationParams::default(),
        };
        let params = self.apply_to(base);
        params
            .validate()
            .context("Invalid simulation parameters")?;
        tracing::info!(
            rate = params.rate,
            sample_count = params.sample_count,
            simulation_count = params.simulation_count,
            seed = %params.seed,
            "resolved simulation parameters"
        );
        Ok(params)
    }

    fn apply_to(&self, base: SimulationParams) -> SimulationParams {
        SimulationParams {
            rate: self.rate.unwrap_or(base.rate),
            sample_count: self.sample_count.unwrap_or(base.sample_count),
            simulation_count: self.simulation_count.unwrap_or(base.simulation_count),
            seed: self.seed.map_or(base.seed, SeedArg::resolve),
        }
    }
}
