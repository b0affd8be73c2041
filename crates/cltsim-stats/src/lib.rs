//! Statistical tools for the CLT simulation.
//!
//! This crate provides:
//!
//! - **Descriptive statistics**: mean, median, unbiased variance, standard deviation
//! - **Percentiles**: nearest-rank percentile lookup
//! - **Histogram**: fixed-width frequency bins with marker lookup
//! - **Empirical CDF**: batch evaluation and distance to a reference CDF
//! - **Two-sample t-test**: pooled and Welch tests from summary statistics
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile computation and storage
//! - [`histogram`]: Histogram construction for visualizing data distributions
//! - [`ecdf`]: Empirical cumulative distribution functions
//! - [`ttest`]: Two-sample t-tests on `(mean, std_dev, count)` summaries
//!
//! # Examples
//!
//! ## Comparing a sample against a reference distribution
//!
//! ```
//! use cltsim_stats::{
//!     descriptive::DescriptiveStats,
//!     ecdf::EmpiricalCdf,
//!     ttest::{SampleSummary, TTestMethod, TwoSampleTTest},
//! };
//!
//! let values = [4.0, 4.5, 5.0, 5.5, 6.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 5.0);
//!
//! let ecdf = EmpiricalCdf::new(values).unwrap();
//! assert_eq!(ecdf.eval(5.0), 0.4);
//!
//! let empirical = SampleSummary::new(stats.mean, stats.std_dev, stats.count);
//! let reference = SampleSummary::new(5.0, 0.8, stats.count);
//! let test = TwoSampleTTest::new(&empirical, &reference, TTestMethod::Pooled).unwrap();
//! assert!(!test.rejects_null(0.05));
//! ```

pub mod descriptive;
pub mod ecdf;
pub mod histogram;
pub mod percentiles;
pub mod ttest;
