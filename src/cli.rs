use crate::types::config::PracticalRule;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "assess",
    version,
    about = "Sewing operator skill assessment scoring CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score an assessment record
    Score(ScoreCommand),
    /// Check an assessment record without scoring it
    Validate(ValidateCommand),
    /// List catalog processes offered for assessment
    Catalog(CatalogCommand),
    /// Build a draft record for a candidate
    Prepare(PrepareCommand),
    /// List saved assessments
    History(HistoryCommand),
}

impl Commands {
    pub fn root(&self) -> &PathBuf {
        match self {
            Commands::Score(cmd) => &cmd.root,
            Commands::Validate(cmd) => &cmd.root,
            Commands::Catalog(cmd) => &cmd.root,
            Commands::Prepare(cmd) => &cmd.root,
            Commands::History(cmd) => &cmd.root,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PracticalRuleArg {
    MachineAware,
    PerformanceOnly,
}

impl From<PracticalRuleArg> for PracticalRule {
    fn from(value: PracticalRuleArg) -> Self {
        match value {
            PracticalRuleArg::MachineAware => PracticalRule::MachineAware,
            PracticalRuleArg::PerformanceOnly => PracticalRule::PerformanceOnly,
        }
    }
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Args)]
pub struct ScoreCommand {
    /// Assessment record JSON file
    pub record: PathBuf,
    /// Site root holding assess.toml and the data directory
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[arg(long, value_enum)]
    pub practical_rule: Option<PracticalRuleArg>,
    /// Skip the multiskill and capacity promotion rules
    #[arg(long)]
    pub no_overrides: bool,
    /// Persist the result under the candidate id
    #[arg(long)]
    pub save: bool,
}

#[derive(Args)]
pub struct ValidateCommand {
    pub record: PathBuf,
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

#[derive(Args)]
pub struct CatalogCommand {
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
    /// Include processes not offered for assessment
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct PrepareCommand {
    pub candidate_id: String,
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
    /// Catalog process to add as a row (repeatable)
    #[arg(long = "process")]
    pub processes: Vec<String>,
    /// Machine type for rows added with --process
    #[arg(long, default_value = "SNLS/DNLS")]
    pub machine: String,
    /// Drop rows carried over from the prior assessment
    #[arg(long, requires = "processes")]
    pub fresh: bool,
    /// Timed cycles for a draft row as ROW=SECONDS[,SECONDS...] (repeatable)
    #[arg(long = "cycle-time", value_parser = parse_row_times)]
    pub cycle_times: Vec<RowTimes>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowTimes {
    pub row: usize,
    pub seconds: Vec<f64>,
}

fn parse_row_times(value: &str) -> Result<RowTimes, String> {
    let (row, times) = value
        .split_once('=')
        .ok_or_else(|| format!("expected ROW=SECONDS[,SECONDS...], got '{value}'"))?;
    let row = row
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid row '{}': {e}", row.trim()))?;
    let seconds = times
        .split(',')
        .map(|time| {
            time.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid cycle time '{}': {e}", time.trim()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RowTimes { row, seconds })
}

#[derive(Args)]
pub struct HistoryCommand {
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}
