//! Comparison report tables
//!
//! Prints the per-group summary of each status followed by one line of test
//! results per status.

use storkwatch_stats::descriptive::DescriptiveStats;

use super::StatusComparison;
use crate::util::Study;

fn fmt_stat(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.3}")
    } else {
        "NaN".to_string()
    }
}

fn print_group_header() {
    println!(
        "  {:<20} {:>6} {:>10} {:>10} {:>10}",
        "Group", "n", "Mean", "Median", "SD"
    );
    // label(20) + n(6) + mean(10) + median(10) + sd(10) + spaces(4)
    println!("  {}", "-".repeat(60));
}

fn print_group_row(label: &str, values: &[f64]) {
    match DescriptiveStats::new(values.iter().copied()) {
        Some(stats) => println!(
            "  {:<20} {:>6} {:>10} {:>10} {:>10}",
            label,
            stats.count,
            fmt_stat(stats.mean),
            fmt_stat(stats.median),
            fmt_stat(stats.std_dev),
        ),
        None => println!(
            "  {:<20} {:>6} {:>10} {:>10} {:>10}",
            label, 0, "-", "-", "-"
        ),
    }
}

fn print_test_header() {
    println!(
        "  {:<20} {:>10} {:>10} {:>10} {:>6} {:>4}",
        "Status", "Levene p", "t", "t-test p", "dof", "Sig"
    );
    // label(20) + levene(10) + t(10) + p(10) + dof(6) + sig(4) + spaces(5)
    println!("  {}", "-".repeat(65));
}

/// Print the comparison report for all statuses
pub(super) fn print_report(
    study: &Study,
    comparisons: &[StatusComparison<'_>],
) -> anyhow::Result<()> {
    let (first, second) = study.config.age_pair()?;
    let alpha = study.config.significance_level;

    println!(
        "Group Comparison Report (target behavior {}, alpha = {alpha})",
        study.config.target_behavior
    );
    println!("==========================================\n");

    for comparison in comparisons {
        println!("{} ({})", comparison.status.label, comparison.status.name);
        print_group_header();
        print_group_row(&first.label, &comparison.samples.first);
        print_group_row(&second.label, &comparison.samples.second);
        println!();
    }

    print_test_header();
    for comparison in comparisons {
        let stats = &comparison.statistics;
        println!(
            "  {:<20} {:>10} {:>10} {:>10} {:>6} {:>4}",
            comparison.status.label,
            fmt_stat(stats.levene_pvalue),
            fmt_stat(stats.ttest_statistic),
            fmt_stat(stats.ttest_pvalue),
            stats.degrees_of_freedom,
            stats.significance_marker(alpha),
        );
    }
    println!();
    println!("Legend:");
    println!("  Levene p : Levene test p-value for equal variances");
    println!("  t        : Student t statistic ({} minus {})", first.label, second.label);
    println!("  t-test p : two-sided p-value assuming equal variances");
    println!("  Sig      : * when t-test p < {alpha}, NS otherwise");

    Ok(())
}
