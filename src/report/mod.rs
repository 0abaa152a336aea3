pub mod json;
pub mod md;

use crate::error::ScoreError;
use crate::scoring::ScoredDataset;
use crate::types::report::{Analytics, ScoreReport, ScoreRow, SourceInfo};
use crate::workbook::LoadedSheet;
use chrono::Utc;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn build(
    sheet: &LoadedSheet,
    scored: &ScoredDataset,
    rows: Vec<ScoreRow>,
    analytics: Analytics,
) -> ScoreReport {
    ScoreReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        generated_at: Utc::now().to_rfc3339(),
        source: SourceInfo {
            path: sheet.path.display().to_string(),
            sheet: sheet.sheet.clone(),
            sha256: sheet.sha256.clone(),
            dropped_columns: sheet.dropped_columns.clone(),
            data_rows: scored.dataset.row_count(),
        },
        sample_row: scored.sample_row,
        categories: scored.assignment.clone(),
        total_possible_score: scored.total_possible(),
        rows,
        warnings: scored.warnings.clone(),
        analytics,
    }
}

pub fn render(report: &ScoreReport, format: OutputFormat) -> Result<String, ScoreError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(ScoreError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}
