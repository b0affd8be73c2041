//! Central Limit Theorem analysis of exponential sample means
//!
//! This crate wires the simulation engine and the statistics toolkit into a
//! single deterministic pipeline and packages the results for display.
//!
//! # Overview
//!
//! 1. **Parameters** ([`cltsim_engine::SimulationParams`]): rate, batch shape, seed
//! 2. **Batch** ([`cltsim_engine::SimulationBatch`]): seeded `Exp(rate)` draws
//! 3. **Sample means** ([`cltsim_engine::SampleMeans`]): one mean per simulation
//! 4. **Summary** ([`report::SummaryComparison`]): mean and unbiased variance
//!    next to `1 / rate` and `1 / (rate^2 n)`
//! 5. **Comparison** ([`report::CdfComparison`], [`report::TTestReport`]):
//!    empirical CDF against the normal CDF, two-sample t-test
//!
//! [`convergence::ConvergenceSweep`] repeats stages 2 to 4 over several sample
//! counts to show the CLT taking hold.
//!
//! # Example
//!
//! ```
//! use cltsim_analysis::pipeline::{self, AnalysisOptions};
//! use cltsim_engine::SimulationParams;
//!
//! let params = SimulationParams {
//!     simulation_count: 500,
//!     ..SimulationParams::default()
//! };
//! let report = pipeline::run(&params, &AnalysisOptions::default()).unwrap();
//!
//! println!("mean of sample means: {:.3}", report.summary.empirical.mean);
//! println!("variance of sample means: {:.3}", report.summary.empirical.variance);
//! println!("p-value: {:.3}", report.t_test.result.p_value);
//! ```

pub mod convergence;
pub mod pipeline;
pub mod report;
