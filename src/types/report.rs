use crate::types::dataset::CellValue;
use crate::types::scoring::{CategoryAssignment, DataQualityWarning, Score};
use serde::Serialize;
use std::fmt;

/// Orderable reporting-year key. Whole-number years sort before free-text labels.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Period {
    Year(i64),
    Label(String),
}

impl Period {
    pub fn from_cell(cell: &CellValue) -> Option<Self> {
        match cell {
            CellValue::Empty => None,
            CellValue::Int(year) => Some(Self::Year(*year)),
            CellValue::Float(value) if value.is_nan() => None,
            CellValue::Float(value) if value.fract() == 0.0 && value.is_finite() => {
                Some(Self::Year(*value as i64))
            }
            CellValue::Text(text) => match text.trim().parse::<i64>() {
                Ok(year) => Some(Self::Year(year)),
                Err(_) => Some(Self::Label(text.clone())),
            },
            other => Some(Self::Label(other.to_string())),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{year}"),
            Self::Label(label) => write!(f, "{label}"),
        }
    }
}

/// One company-year line of the scored summary view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRow {
    pub source_row: usize,
    pub company: String,
    pub year: Period,
    pub sector: String,
    pub calculated_score: Score,
    pub percentage_score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMean<K> {
    pub key: K,
    pub mean: Score,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearOverYear {
    pub company: String,
    pub sector: String,
    pub previous_year: Period,
    pub year: Period,
    pub previous_percentage: Score,
    pub percentage: Score,
    pub delta: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: Score,
    pub upper: Score,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorShare {
    pub sector: String,
    pub count: usize,
    pub share: Score,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Analytics {
    pub sector_means: Vec<GroupMean<String>>,
    pub year_means: Vec<GroupMean<Period>>,
    pub top: Vec<ScoreRow>,
    pub bottom: Vec<ScoreRow>,
    pub year_over_year: Vec<YearOverYear>,
    pub distribution: Vec<HistogramBin>,
    pub sector_representation: Vec<SectorShare>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceInfo {
    pub path: String,
    pub sheet: String,
    pub sha256: String,
    pub dropped_columns: Vec<String>,
    pub data_rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub version: String,
    pub generated_at: String,
    pub source: SourceInfo,
    pub sample_row: usize,
    pub categories: CategoryAssignment,
    pub total_possible_score: usize,
    pub rows: Vec<ScoreRow>,
    pub warnings: Vec<DataQualityWarning>,
    pub analytics: Analytics,
}
