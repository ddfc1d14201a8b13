//! Statistical utilities for the Storkwatch project.
//!
//! This crate provides the numeric building blocks used to compare
//! behavior prevalence between groups of tracked individuals:
//!
//! - **Descriptive statistics**: mean, median, sample variance, standard deviation
//! - **Percentiles**: linearly interpolated percentile values
//! - **Box-plot summaries**: quartiles, whiskers, and means for plotting
//! - **Distributions**: Student's t and Fisher-Snedecor survival functions
//! - **Hypothesis tests**: Levene's test and Student's two-sample t-test
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing samples
//! - [`percentiles`]: Percentile computation
//! - [`boxplot`]: Box-plot summary statistics
//! - [`distribution`]: Continuous distributions backing the p-values
//! - [`hypothesis`]: Two-sample variance and mean tests
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use storkwatch_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Comparing two groups
//!
//! ```
//! use storkwatch_stats::hypothesis::{Center, levene, ttest_ind};
//!
//! let adults = [10.0, 20.0, 30.0];
//! let juveniles = [15.0, 25.0];
//!
//! let variance = levene(&[&adults, &juveniles], Center::Median);
//! let means = ttest_ind(&adults, &juveniles);
//! assert!(variance.pvalue > 0.05);
//! assert_eq!(means.statistic, 0.0);
//! ```

pub mod boxplot;
pub mod descriptive;
pub mod distribution;
pub mod hypothesis;
pub mod percentiles;
