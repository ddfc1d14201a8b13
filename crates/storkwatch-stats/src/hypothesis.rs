//! Two-sample hypothesis tests
//!
//! - [`levene`]: equality of variances (Levene / Brown-Forsythe)
//! - [`ttest_ind`]: difference of means assuming equal variances (Student)
//!
//! Neither test guards against degenerate samples. Groups with fewer than
//! two values, or with zero spread, produce `NaN` or infinite statistics
//! which propagate into the p-values unchanged.

use crate::{
    descriptive::{self, sample_variance},
    distribution::{FisherSnedecor, StudentT},
};

/// Outcome of a hypothesis test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestResult {
    /// The test statistic (W for Levene, t for Student).
    pub statistic: f64,
    /// The p-value of the statistic under the null hypothesis.
    pub pvalue: f64,
}

/// Location used to compute absolute deviations in [`levene`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Center {
    /// Deviations from the group median (Brown-Forsythe variant, robust to skew).
    #[default]
    Median,
    /// Deviations from the group mean (Levene's original test).
    Mean,
}

impl Center {
    fn locate(self, values: &[f64]) -> f64 {
        match self {
            Center::Median => descriptive::median(values),
            Center::Mean => descriptive::mean(values),
        }
    }
}

/// Levene's test for equality of variances across `groups`.
///
/// Each value is replaced by its absolute deviation from its group's
/// center, then a one-way ANOVA is run on the deviations:
///
/// ```text
/// W = (N - k) / (k - 1) * Σ nᵢ (z̄ᵢ - z̄)² / Σ Σ (zᵢⱼ - z̄ᵢ)²
/// ```
///
/// with `p = P(F(k - 1, N - k) > W)`.
///
/// # Examples
///
/// ```
/// use storkwatch_stats::hypothesis::{Center, levene};
///
/// let result = levene(&[&[10.0, 20.0, 30.0], &[15.0, 25.0]], Center::Median);
/// assert!((result.statistic - 0.15).abs() < 1e-12);
/// assert!((result.pvalue - 0.724_377_486_113_15).abs() < 1e-9);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn levene(groups: &[&[f64]], center: Center) -> TestResult {
    let k = groups.len() as f64;
    let total = groups.iter().map(|g| g.len()).sum::<usize>() as f64;

    let deviations = groups
        .iter()
        .map(|group| {
            let c = center.locate(group);
            group.iter().map(|v| (v - c).abs()).collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let group_means = deviations
        .iter()
        .map(|z| descriptive::mean(z))
        .collect::<Vec<_>>();
    let grand_mean = deviations.iter().flatten().sum::<f64>() / total;

    let between = deviations
        .iter()
        .zip(&group_means)
        .map(|(z, zbar)| z.len() as f64 * (zbar - grand_mean).powi(2))
        .sum::<f64>();
    let within = deviations
        .iter()
        .zip(&group_means)
        .map(|(z, zbar)| z.iter().map(|v| (v - zbar).powi(2)).sum::<f64>())
        .sum::<f64>();

    let statistic = (total - k) / (k - 1.0) * between / within;
    let pvalue = FisherSnedecor::new(k - 1.0, total - k).sf(statistic);
    TestResult { statistic, pvalue }
}

/// Student's two-sample t-test assuming equal population variances.
///
/// Uses the pooled variance and `n₁ + n₂ - 2` degrees of freedom; the
/// p-value is two-sided.
///
/// # Examples
///
/// ```
/// use storkwatch_stats::hypothesis::ttest_ind;
///
/// let result = ttest_ind(&[1.0, 2.0, 3.0], &[4.0, 5.0]);
/// assert!((result.statistic + 3.0).abs() < 1e-12);
/// assert!((result.pvalue - 0.057_668_885_622_437).abs() < 1e-9);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn ttest_ind(a: &[f64], b: &[f64]) -> TestResult {
    let n1 = a.len() as f64;
    let n2 = b.len() as f64;
    let mean1 = descriptive::mean(a);
    let mean2 = descriptive::mean(b);
    let df = n1 + n2 - 2.0;

    let pooled = ((n1 - 1.0) * sample_variance(a, mean1) + (n2 - 1.0) * sample_variance(b, mean2))
        / df;
    let statistic = (mean1 - mean2) / (pooled * (1.0 / n1 + 1.0 / n2)).sqrt();
    let pvalue = StudentT::new(df).two_sided_p(statistic);
    TestResult { statistic, pvalue }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_ttest_equal_means() {
        let result = ttest_ind(&[10.0, 20.0, 30.0], &[15.0, 25.0]);
        assert_eq!(result.statistic, 0.0);
        assert!((result.pvalue - 1.0).abs() < TOL);
    }

    #[test]
    fn test_ttest_df2_closed_form() {
        let result = ttest_ind(&[1.0, 3.0], &[2.0, 6.0]);
        assert!((result.statistic + 0.894_427_190_999_915_9).abs() < TOL);
        assert!((result.pvalue - 0.465_477_516_175_151_2).abs() < TOL);
    }

    #[test]
    fn test_ttest_is_antisymmetric() {
        let a = [3.0, 4.5, 6.0, 2.0];
        let b = [8.0, 7.5, 9.0];
        let ab = ttest_ind(&a, &b);
        let ba = ttest_ind(&b, &a);
        assert!((ab.statistic + ba.statistic).abs() < TOL);
        assert!((ab.pvalue - ba.pvalue).abs() < TOL);
    }

    #[test]
    fn test_ttest_single_value_group_is_nan() {
        let result = ttest_ind(&[5.0], &[5.0]);
        assert!(result.statistic.is_nan());
        assert!(result.pvalue.is_nan());
    }

    #[test]
    fn test_ttest_empty_group_is_nan() {
        let result = ttest_ind(&[1.0, 2.0, 3.0], &[]);
        assert!(result.statistic.is_nan());
        assert!(result.pvalue.is_nan());
    }

    #[test]
    fn test_ttest_zero_variance_different_means() {
        let result = ttest_ind(&[1.0, 1.0], &[2.0, 2.0]);
        assert_eq!(result.statistic, f64::NEG_INFINITY);
        assert_eq!(result.pvalue, 0.0);
    }

    #[test]
    fn test_levene_identical_spread() {
        // Same deviations around each median: no between-group effect.
        let result = levene(&[&[1.0, 2.0, 3.0], &[11.0, 12.0, 13.0]], Center::Median);
        assert!(result.statistic.abs() < TOL);
        assert!((result.pvalue - 1.0).abs() < TOL);
    }

    #[test]
    fn test_levene_mean_center() {
        // Deviations from the means are [1, 0, 1] and [2, 0, 2]:
        // between = 2/3, within = 10/3, W = 4 * (2/3) / (10/3) = 0.8
        let result = levene(&[&[1.0, 2.0, 3.0], &[0.0, 2.0, 4.0]], Center::Mean);
        assert!((result.statistic - 0.8).abs() < TOL);
        let expected = FisherSnedecor::new(1.0, 4.0).sf(0.8);
        assert!((result.pvalue - expected).abs() < TOL);
        assert!(result.pvalue > 0.4 && result.pvalue < 0.5);
    }

    #[test]
    fn test_levene_degenerate_group_is_nan() {
        let result = levene(&[&[4.0], &[]], Center::Median);
        assert!(result.statistic.is_nan());
        assert!(result.pvalue.is_nan());
    }
}
