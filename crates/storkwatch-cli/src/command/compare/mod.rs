//! Group comparison command
//!
//! Loads both age groups' percentage tables for every configured status,
//! tests the difference between the groups, writes the statistic tables and
//! renders the comparative box plot.

mod table;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use storkwatch_analysis::{
    compare::{GroupSamples, GroupStatistics},
    study::Status,
};

use crate::{
    command::StudyArg,
    data::{self, ResultTable, format_statistic},
    plot::{self, BoxPlot, StatusPanel},
    util::Study,
};

#[derive(Debug, Clone, Args)]
pub(crate) struct CompareArg {
    /// Skip rendering the box plot
    #[arg(long)]
    pub no_plot: bool,
    /// Box plot output path (PNG, or SVG for `.svg`); overrides the configured path
    #[arg(long)]
    pub figure: Option<PathBuf>,
    /// Upper limit of the plot's percentage axis
    #[arg(long, default_value_t = plot::DEFAULT_Y_MAX)]
    pub y_max: f64,
}

/// Test inputs and outputs of one status.
#[derive(Debug, Clone)]
pub(crate) struct StatusComparison<'a> {
    pub status: &'a Status,
    pub samples: GroupSamples,
    pub statistics: GroupStatistics,
}

pub(crate) fn run(study_arg: &StudyArg, arg: &CompareArg) -> anyhow::Result<()> {
    let study = Study::load(study_arg)?;
    compare_all(&study, arg)
}

pub(crate) fn compare_all(study: &Study, arg: &CompareArg) -> anyhow::Result<()> {
    let comparisons = study
        .config
        .statuses
        .iter()
        .map(|status| compare_status(study, status))
        .collect::<anyhow::Result<Vec<_>>>()?;

    table::print_report(study, &comparisons)?;
    save_results(study, &comparisons)?;

    if !arg.no_plot {
        let path = arg
            .figure
            .clone()
            .unwrap_or_else(|| study.layout.figure_path.clone());
        render_plot(study, &comparisons, arg.y_max, &path)?;
        log::info!("Box plot written to {}", path.display());
    }
    Ok(())
}

fn compare_status<'a>(study: &Study, status: &'a Status) -> anyhow::Result<StatusComparison<'a>> {
    let (first, second) = study.config.age_pair()?;
    let first = data::load_percentage_table(&study.layout.percentage_table(first, status))?;
    let second = data::load_percentage_table(&study.layout.percentage_table(second, status))?;

    let samples = GroupSamples::from_percentages(&first, &second);
    log::info!(
        "{}: comparing {} vs {} defined percentages",
        status.name,
        samples.first.len(),
        samples.second.len()
    );
    let statistics = samples.compare(study.config.levene_center.into());
    Ok(StatusComparison {
        status,
        samples,
        statistics,
    })
}

/// Result tables with one column per status, in configured order.
fn result_tables(comparisons: &[StatusComparison<'_>]) -> [ResultTable; 3] {
    let columns = comparisons.iter().map(|c| c.status.name.as_str());
    let stats = comparisons.iter().map(|c| c.statistics).collect::<Vec<_>>();

    let mut pvalues = ResultTable::new(columns.clone());
    pvalues.push_row("Levene", stats.iter().map(|s| format_statistic(s.levene_pvalue)));
    pvalues.push_row("ttest", stats.iter().map(|s| format_statistic(s.ttest_pvalue)));

    let mut statistics = ResultTable::new(columns.clone());
    statistics.push_row("0", stats.iter().map(|s| format_statistic(s.ttest_statistic)));

    let mut freedom_degrees = ResultTable::new(columns);
    freedom_degrees.push_row("0", stats.iter().map(|s| s.degrees_of_freedom));

    [pvalues, statistics, freedom_degrees]
}

fn save_results(study: &Study, comparisons: &[StatusComparison<'_>]) -> anyhow::Result<()> {
    let [pvalues, statistics, freedom_degrees] = result_tables(comparisons);
    let layout = &study.layout;
    pvalues.save(&layout.pvalues_table())?;
    statistics.save(&layout.statistics_table())?;
    freedom_degrees.save(&layout.freedom_degree_table())?;
    log::info!("Statistic tables written to {}", layout.results_dir.display());
    Ok(())
}

fn render_plot(
    study: &Study,
    comparisons: &[StatusComparison<'_>],
    y_max: f64,
    path: &Path,
) -> anyhow::Result<()> {
    let (first, second) = study.config.age_pair()?;
    let alpha = study.config.significance_level;
    let plot = BoxPlot {
        group_labels: [&first.label, &second.label],
        panels: comparisons
            .iter()
            .map(|c| StatusPanel {
                label: &c.status.label,
                groups: [&c.samples.first, &c.samples.second],
                significant: c.statistics.is_significant(alpha),
            })
            .collect(),
        y_max,
    };
    plot.save(path).context("Failed to save box plot")
}
