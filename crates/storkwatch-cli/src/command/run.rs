use clap::Args;

use super::{aggregate, compare, compare::CompareArg};
use crate::{command::StudyArg, util::Study};

#[derive(Debug, Clone, Args)]
pub(crate) struct RunArg {
    #[clap(flatten)]
    pub compare: CompareArg,
}

/// Aggregates every configured combination, then compares.
///
/// Comparison starts only after all percentage tables have been written.
pub(crate) fn run(study_arg: &StudyArg, arg: &RunArg) -> anyhow::Result<()> {
    let study = Study::load(study_arg)?;
    aggregate::aggregate_selected(&study, &[], &[])?;
    compare::compare_all(&study, &arg.compare)
}
