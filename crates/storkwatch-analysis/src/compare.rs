//! Group comparison of behavior percentages
//!
//! Compares the per-individual percentages of two age groups within one
//! status. Undefined percentages are dropped from each group independently,
//! then Levene's test checks equality of variances and Student's t-test
//! (equal variances assumed) checks the difference of means.
//!
//! No guarding is added for small groups: with fewer than two defined
//! values in a group the test outputs are non-finite and are reported as is.

use storkwatch_stats::hypothesis::{self, Center};


/// Test outputs for one status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupStatistics {
    /// p-value of Levene's test for equal variances.
    pub levene_pvalue: f64,
    /// Two-sided p-value of Student's t-test.
    pub ttest_pvalue: f64,
    /// Student's t statistic (first group minus second group).
    pub ttest_statistic: f64,
    /// `n₁ + n₂ - 2` over the defined values of both groups.
    pub degrees_of_freedom: i64,
}

impl GroupStatistics {
    /// Whether the mean difference is significant at level `alpha`.
    ///
    /// A non-finite p-value is never significant.
    #[must_use]
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.ttest_pvalue < alpha
    }

    /// Display marker used when annotating plots: `*` or `NS`.
    #[must_use]
    pub fn significance_marker(&self, alpha: f64) -> &'static str {
        if self.is_significant(alpha) { "*" } else { "NS" }
    }
}

/// Defined values of two groups, ready for testing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupSamples {
    pub first: Vec<f64>,
    pub second: Vec<f64>,
}

impl GroupSamples {
    /// Drops undefined entries from each group independently.
    #[must_use]
    pub fn from_percentages(first: &[Option<f64>], second: &[Option<f64>]) -> Self {
        Self {
            first: defined(first),
            second: defined(second),
        }
    }

    /// Runs both tests on the defined values.
    #[expect(clippy::cast_possible_wrap)]
    #[must_use]
    pub fn compare(&self, center: Center) -> GroupStatistics {
        let Self { first, second } = self;
        if first.len() < 2 || second.len() < 2 {
            log::warn!(
                "Fewer than two defined values in a group ({} vs {}); test results will be non-finite",
                first.len(),
                second.len()
            );
        }

        let levene = hypothesis::levene(&[first, second], center);
        let ttest = hypothesis::ttest_ind(first, second);

        GroupStatistics {
            levene_pvalue: levene.pvalue,
            ttest_pvalue: ttest.pvalue,
            ttest_statistic: ttest.statistic,
            degrees_of_freedom: (first.len() + second.len()) as i64 - 2,
        }
    }
}

/// Compares two groups of raw percentages (undefined entries allowed).
///
/// # Examples
///
/// ```
/// use storkwatch_analysis::compare::compare;
/// use storkwatch_stats::hypothesis::Center;
///
/// let stats = compare(
///     &[Some(10.0), Some(20.0), Some(30.0)],
///     &[Some(15.0), Some(25.0), None],
///     Center::Median,
/// );
/// assert_eq!(stats.degrees_of_freedom, 3);
/// assert_eq!(stats.ttest_statistic, 0.0);
/// ```
#[must_use]
pub fn compare(first: &[Option<f64>], second: &[Option<f64>], center: Center) -> GroupStatistics {
    GroupSamples::from_percentages(first, second).compare(center)
}

fn defined(values: &[Option<f64>]) -> Vec<f64> {
    values
        .iter()
        .flatten()
        .copied()
        .filter(|v| !v.is_nan())
        .collect()
}
