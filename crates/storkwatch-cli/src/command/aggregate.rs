use anyhow::Context;
use clap::Args;
use storkwatch_analysis::{
    aggregate,
    observation::ObservationLog,
    study::{AgeGroup, Status},
};

use crate::{command::StudyArg, data, util::Study};

#[derive(Debug, Clone, Args)]
pub(crate) struct AggregateArg {
    /// Age groups to aggregate (comma-separated, all configured groups when omitted)
    #[arg(long = "age", value_delimiter = ',')]
    pub ages: Vec<String>,
    /// Statuses to aggregate (comma-separated, all configured statuses when omitted)
    #[arg(long = "status", value_delimiter = ',')]
    pub statuses: Vec<String>,
}

pub(crate) fn run(study_arg: &StudyArg, arg: &AggregateArg) -> anyhow::Result<()> {
    let study = Study::load(study_arg)?;
    aggregate_selected(&study, &arg.ages, &arg.statuses)
}

/// Aggregates every selected age × status combination and writes the
/// percentage tables. Stops at the first combination that fails.
pub(crate) fn aggregate_selected(
    study: &Study,
    ages: &[String],
    statuses: &[String],
) -> anyhow::Result<()> {
    let config = &study.config;
    let ages = select(&config.age_groups, ages, "age group", |name| config.age_group(name))?;
    let statuses = select(&config.statuses, statuses, "status", |name| config.status(name))?;

    for age in ages {
        let path = study.layout.observation_log(age);
        let log = data::load_observation_log(&path)?;
        log::info!(
            "Loaded {} observations of {} individuals from {}",
            log.num_observations(),
            log.num_individuals(),
            path.display()
        );
        for status in &statuses {
            aggregate_combination(study, age, status, &log)
                .with_context(|| format!("Failed to aggregate {} / {}", age.name, status.name))?;
        }
    }
    Ok(())
}

fn aggregate_combination(
    study: &Study,
    age: &AgeGroup,
    status: &Status,
    log: &ObservationLog,
) -> anyhow::Result<()> {
    let intervals = data::load_interval_table(&study.layout.interval_table(age, status))?;
    let records = aggregate::aggregate(log, &intervals, study.config.target_behavior);

    let defined = aggregate::defined_percentages(&records).count();
    let path = study.layout.percentage_table(age, status);
    data::save_percentage_table(&path, &records)?;
    log::info!(
        "{} / {}: {} individuals ({} with data, {} intervals) -> {}",
        age.name,
        status.name,
        records.len(),
        defined,
        intervals.num_intervals(),
        path.display()
    );
    Ok(())
}

/// Picks the configured entries named in `names`, or all of them when
/// `names` is empty.
fn select<'a, T>(
    all: &'a [T],
    names: &[String],
    kind: &str,
    lookup: impl Fn(&str) -> Option<&'a T>,
) -> anyhow::Result<Vec<&'a T>> {
    if names.is_empty() {
        return Ok(all.iter().collect());
    }
    names
        .iter()
        .map(|name| lookup(name).ok_or_else(|| anyhow::anyhow!("Unknown {kind}: {name}")))
        .collect()
}
