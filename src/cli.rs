use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "brr-score",
    version,
    about = "Survey workbook column classification and compliance scoring CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Extra config file, applied over brr.toml and .brr/local.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show how each column is categorised from the sample row
    Classify(ClassifyCommand),
    /// Score every row and print the report
    Score(ScoreCommand),
    /// Write scored rows to .xlsx files
    Export(ExportCommand),
}

/// Workbook selection shared by every command.
#[derive(Args)]
pub struct SheetArgs {
    /// Workbook to read (.xlsx, .xls, .ods)
    pub path: PathBuf,
    /// Sheet name or zero-based index [default: Sheet4]
    #[arg(short, long)]
    pub sheet: Option<String>,
    /// Zero-based data row used to classify columns [default: 1]
    #[arg(long)]
    pub sample_row: Option<usize>,
}

#[derive(Args)]
pub struct ClassifyCommand {
    #[command(flatten)]
    pub input: SheetArgs,
}

#[derive(Args)]
pub struct ScoreCommand {
    #[command(flatten)]
    pub input: SheetArgs,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Rows shown in the top and bottom performer lists [default: 5]
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Args)]
pub struct ExportCommand {
    #[command(flatten)]
    pub input: SheetArgs,
    /// Only export rows of this sector
    #[arg(long, conflicts_with = "each_sector")]
    pub sector: Option<String>,
    /// Write one file per sector
    #[arg(long)]
    pub each_sector: bool,
    /// Export every source column, not only company, year and sector
    #[arg(long)]
    pub full: bool,
    /// Directory for the exported files [default: current directory]
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
