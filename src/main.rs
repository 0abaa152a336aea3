mod cli;
mod config;
mod error;
mod export;
mod report;
mod scoring;
mod types;
mod workbook;

use crate::error::Result;
use crate::scoring::{analytics, ScoredDataset};
use crate::types::config::BrrConfig;
use crate::types::scoring::ColumnKind;
use crate::workbook::LoadedSheet;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const CONFIGURATION: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

/// Config, loaded sheet and scores for one workbook.
struct Session {
    config: BrrConfig,
    sheet: LoadedSheet,
    scored: ScoredDataset,
}

impl Session {
    fn exit_code(&self) -> i32 {
        if self.scored.warnings.is_empty() {
            exit_code::SUCCESS
        } else {
            exit_code::WARNINGS
        }
    }
}

fn prepare(input: &cli::SheetArgs, config_path: Option<&Path>) -> Result<Session> {
    let root = input
        .path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let config = config::load_config(root, config_path)?;
    let selector = input.sheet.as_deref().unwrap_or(&config.input.sheet);
    let mut sheet = workbook::load(&input.path, selector, &config.input.drop_columns)?;

    let sample_row = input.sample_row.unwrap_or(config.scoring.sample_row);
    let dataset = std::mem::take(&mut sheet.dataset);
    let scored = scoring::score_dataset(dataset, sample_row, &config.scoring)?;

    Ok(Session {
        config,
        sheet,
        scored,
    })
}

fn run(cli: cli::Cli) -> Result<i32> {
    let config_path = cli.config.as_deref();
    match cli.command {
        cli::Commands::Classify(cmd) => {
            let session = prepare(&cmd.input, config_path)?;
            let assignment = &session.scored.assignment;
            let unclassified = session
                .scored
                .dataset
                .columns()
                .iter()
                .filter(|column| assignment.kind_of(column) == ColumnKind::Unclassified)
                .cloned()
                .collect::<Vec<_>>();

            println!("sample row: {}", session.scored.sample_row);
            println!("binary (Yes/No): {}", assignment.binary.join(", "));
            println!("range (1-4): {}", assignment.range.join(", "));
            println!("list (P1,P2,...): {}", assignment.list.join(", "));
            println!("unclassified: {}", unclassified.join(", "));
            println!("total possible score: {}", assignment.total_possible());
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Score(cmd) => {
            let session = prepare(&cmd.input, config_path)?;
            let rows = session.scored.score_rows(&session.config.fields)?;
            let summary = analytics::analyze(&rows, &session.config.analytics, cmd.top);
            let score_report = report::build(&session.sheet, &session.scored, rows, summary);

            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
            };
            let rendered = report::render(&score_report, output_format)?;
            println!("{rendered}");

            if !session.scored.warnings.is_empty() {
                eprintln!(
                    "warning: {} cell(s) scored under a fallback rule",
                    session.scored.warnings.len()
                );
            }
            Ok(session.exit_code())
        }
        cli::Commands::Export(cmd) => {
            let session = prepare(&cmd.input, config_path)?;
            let rows = session.scored.score_rows(&session.config.fields)?;

            let out_dir = cmd
                .out_dir
                .clone()
                .or_else(|| session.config.export.out_dir.as_ref().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from("."));
            let base = session.sheet.base_name();
            let target = export::ExportTarget {
                out_dir: &out_dir,
                base: &base,
                sheet: &session.sheet.sheet,
            };
            let scope = if cmd.full {
                export::Scope::Full
            } else {
                export::Scope::Summary
            };
            let filter = match (&cmd.sector, cmd.each_sector) {
                (Some(sector), _) => export::SectorFilter::One(sector.clone()),
                (None, true) => export::SectorFilter::Each,
                (None, false) => export::SectorFilter::All,
            };

            let written = export::export(
                &target,
                &session.scored,
                &rows,
                &session.config.fields,
                scope,
                &filter,
            )?;
            for path in &written {
                println!("exported: {}", path.display());
            }
            Ok(session.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "brr-score starting");

    match run(cli) {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            let code = if e.is_configuration() {
                exit_code::CONFIGURATION
            } else {
                exit_code::RUNTIME_FAILURE
            };
            std::process::exit(code);
        }
    }
}
