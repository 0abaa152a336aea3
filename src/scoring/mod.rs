pub mod analytics;
pub mod classify;
pub mod compute;

use crate::error::{Result, ScoreError};
use crate::types::config::{FieldConfig, ScoringConfig};
use crate::types::dataset::{CellValue, Dataset};
use crate::types::report::{Period, ScoreRow};
use crate::types::scoring::{CategoryAssignment, DataQualityWarning, RowScore};

pub const CALCULATED_SCORE_COLUMN: &str = "Calculated Score";
pub const PERCENTAGE_SCORE_COLUMN: &str = "Percentage Score";

/// A dataset together with its classification and per-row scores.
#[derive(Debug, Clone)]
pub struct ScoredDataset {
    pub dataset: Dataset,
    pub sample_row: usize,
    pub assignment: CategoryAssignment,
    pub scores: Vec<RowScore>,
    pub warnings: Vec<DataQualityWarning>,
}

/// Classifies the columns from `sample_row` and scores every row.
pub fn score_dataset(
    dataset: Dataset,
    sample_row: usize,
    rules: &ScoringConfig,
) -> Result<ScoredDataset> {
    let assignment = classify::classify(&dataset, sample_row, rules)?;

    let mut warnings = Vec::new();
    let scores = dataset
        .records()
        .map(|record| compute::score_record(&record, &assignment, rules, &mut warnings))
        .collect::<Vec<_>>();

    tracing::info!(
        rows = scores.len(),
        total_possible = assignment.total_possible(),
        warnings = warnings.len(),
        "dataset scored"
    );

    Ok(ScoredDataset {
        dataset,
        sample_row,
        assignment,
        scores,
        warnings,
    })
}

impl ScoredDataset {
    pub fn total_possible(&self) -> usize {
        self.assignment.total_possible()
    }

    /// The source dataset with the two score columns appended.
    pub fn augmented(&self) -> Dataset {
        let total = self.total_possible();
        let calculated = self
            .scores
            .iter()
            .map(|score| CellValue::Float(score.calculated()))
            .collect();
        let percentage = self
            .scores
            .iter()
            .map(|score| CellValue::Float(score.percentage(total)))
            .collect();
        self.dataset
            .with_column(CALCULATED_SCORE_COLUMN, calculated)
            .with_column(PERCENTAGE_SCORE_COLUMN, percentage)
    }

    /// Company-year view used by analytics and export. Rows lacking a
    /// company, year or sector are left out.
    pub fn score_rows(&self, fields: &FieldConfig) -> Result<Vec<ScoreRow>> {
        for column in [&fields.company, &fields.year, &fields.sector] {
            if self.dataset.column_index(column).is_none() {
                return Err(ScoreError::MissingColumn(column.clone()));
            }
        }

        let total = self.total_possible();
        let rows = self
            .dataset
            .records()
            .zip(&self.scores)
            .filter_map(|(record, score)| {
                let company = label(record.get(&fields.company))?;
                let year = Period::from_cell(record.get(&fields.year))?;
                let sector = label(record.get(&fields.sector))?;
                Some(ScoreRow {
                    source_row: record.row(),
                    company,
                    year,
                    sector,
                    calculated_score: score.calculated(),
                    percentage_score: score.percentage(total),
                })
            })
            .collect::<Vec<_>>();

        let skipped = self.dataset.row_count() - rows.len();
        if skipped > 0 {
            tracing::info!(skipped, "rows without company, year or sector left out");
        }
        Ok(rows)
    }
}

fn label(cell: &CellValue) -> Option<String> {
    if cell.is_missing() {
        None
    } else {
        Some(cell.to_string())
    }
}
