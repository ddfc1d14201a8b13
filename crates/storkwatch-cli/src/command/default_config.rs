use std::path::PathBuf;

use clap::Args;
use storkwatch_analysis::study::StudyConfig;

use crate::util::Output;

#[derive(Debug, Clone, Args)]
pub(crate) struct DefaultConfigArg {
    /// Output file path (stdout when omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DefaultConfigArg) -> anyhow::Result<()> {
    Output::save_json(&StudyConfig::default(), arg.output.clone())
}
