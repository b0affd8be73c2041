//! Seeded simulation of exponential sample means.
//!
//! - [`SimulationParams`] - Rate, batch shape, and seed of a run
//! - [`SimulationSeed`] - Seed for deterministic generation
//! - [`SimulationBatch`] - Matrix of exponential draws, one row per simulation
//! - [`SampleMeans`] - Row-wise means of a batch
//! - [`TheoreticalDistribution`] - Normal approximation predicted by the CLT
//!
//! # Example
//!
//! ```
//! use cltsim_engine::{SimulationBatch, SimulationParams, TheoreticalDistribution};
//!
//! let params = SimulationParams::default();
//! let batch = SimulationBatch::generate(&params).unwrap();
//! let means = batch.sample_means();
//! let theory = TheoreticalDistribution::new(&params).unwrap();
//!
//! assert_eq!(means.len(), params.simulation_count);
//! assert!((theory.mean() - params.population_mean()).abs() < 1e-12);
//! ```

pub use self::{batch::*, params::*, seed::*, theory::*};

mod batch;
mod params;
mod seed;
mod theory;
