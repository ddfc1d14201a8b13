use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use self::{
    aggregate::AggregateArg, compare::CompareArg, default_config::DefaultConfigArg, run::RunArg,
};

mod aggregate;
mod compare;
mod default_config;
mod run;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[clap(flatten)]
    study: StudyArg,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

/// Options locating the study shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub(crate) struct StudyArg {
    /// Study configuration JSON file (built-in defaults when omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Directory the configured data layout is relative to
    #[arg(long, global = true, default_value = ".")]
    pub data_root: PathBuf,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Compute per-individual behavior percentages for each age group and status
    Aggregate(#[clap(flatten)] AggregateArg),
    /// Compare the age groups' percentages per status and plot them
    Compare(#[clap(flatten)] CompareArg),
    /// Aggregate every combination, then compare
    Run(#[clap(flatten)] RunArg),
    /// Print or save the default study configuration
    DefaultConfig(#[clap(flatten)] DefaultConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Aggregate(arg) => aggregate::run(&args.study, &arg)?,
        Mode::Compare(arg) => compare::run(&args.study, &arg)?,
        Mode::Run(arg) => run::run(&args.study, &arg)?,
        Mode::DefaultConfig(arg) => default_config::run(&arg)?,
    }
    Ok(())
}
