use serde::Serialize;
use std::fmt;

pub type Score = f64;

/// Semantic category inferred for a column from its sample-row value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Unclassified,
    Binary,
    Range,
    List,
}

/// Disjoint column lists, in worksheet order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryAssignment {
    pub binary: Vec<String>,
    pub range: Vec<String>,
    pub list: Vec<String>,
}

impl CategoryAssignment {
    pub fn total_possible(&self) -> usize {
        self.binary.len() + self.range.len() + self.list.len()
    }

    pub fn kind_of(&self, column: &str) -> ColumnKind {
        let listed = |columns: &[String]| columns.iter().any(|name| name == column);
        if listed(&self.binary) {
            ColumnKind::Binary
        } else if listed(&self.range) {
            ColumnKind::Range
        } else if listed(&self.list) {
            ColumnKind::List
        } else {
            ColumnKind::Unclassified
        }
    }
}

/// Per-category contributions for one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RowScore {
    pub binary: Score,
    pub range: Score,
    pub list: Score,
}

impl RowScore {
    pub fn calculated(&self) -> Score {
        self.binary + self.range + self.list
    }

    /// Defined as 0.0 when nothing is scorable.
    pub fn percentage(&self, total_possible: usize) -> Score {
        if total_possible == 0 {
            0.0
        } else {
            self.calculated() / total_possible as Score
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningKind {
    RangeNotInteger { value: String },
    RangeOutOfBounds { value: i64 },
    ListNotText { value: String },
}

/// A cell that was scored under a fallback rule instead of the normal one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataQualityWarning {
    pub row: usize,
    pub column: String,
    #[serde(flatten)]
    pub kind: WarningKind,
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::RangeNotInteger { value } => write!(
                f,
                "row {} column {:?}: range value {:?} is not an integer, skipped",
                self.row, self.column, value
            ),
            WarningKind::RangeOutOfBounds { value } => write!(
                f,
                "row {} column {:?}: range value {} is outside the answer scale",
                self.row, self.column, value
            ),
            WarningKind::ListNotText { value } => write!(
                f,
                "row {} column {:?}: list value {:?} is not text, skipped",
                self.row, self.column, value
            ),
        }
    }
}
