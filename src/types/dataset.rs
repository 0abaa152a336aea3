use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A single spreadsheet cell after loading.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
}

impl CellValue {
    /// Empty cells, NaN and blank text all read as missing.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Float(value) => value.is_nan(),
            Self::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(text) => write!(f, "{text}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) if value.fract() == 0.0 && value.is_finite() => {
                write!(f, "{}", *value as i64)
            }
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

static EMPTY: CellValue = CellValue::Empty;

/// Ordered columns plus rows aligned to them.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
    index: HashMap<String, usize>,
}

impl Dataset {
    /// Rows shorter than the header are padded with `Empty`; longer rows are cut.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        let index = columns
            .iter()
            .enumerate()
            .map(|(position, name)| (name.clone(), position))
            .collect();
        Self {
            columns,
            rows,
            index,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn record(&self, row: usize) -> Option<Record<'_>> {
        self.rows.get(row).map(|cells| Record {
            dataset: self,
            row,
            cells,
        })
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().enumerate().map(|(row, cells)| Record {
            dataset: self,
            row,
            cells,
        })
    }

    /// Removes the named columns that exist and returns the names actually dropped.
    pub fn drop_columns(&mut self, names: &[String]) -> Vec<String> {
        let removed: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, column)| names.contains(column))
            .map(|(position, _)| position)
            .collect();
        if removed.is_empty() {
            return Vec::new();
        }

        let dropped = removed
            .iter()
            .map(|position| self.columns[*position].clone())
            .collect();
        let keep = |position: &usize| !removed.contains(position);
        let columns = self
            .columns
            .iter()
            .enumerate()
            .filter(|(position, _)| keep(position))
            .map(|(_, column)| column.clone())
            .collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(position, _)| keep(position))
                    .map(|(_, cell)| cell.clone())
                    .collect()
            })
            .collect();
        *self = Self::new(columns, rows);
        dropped
    }

    /// Rows for which `keep` holds, in source order.
    pub fn filter(&self, keep: impl Fn(&Record<'_>) -> bool) -> Self {
        let rows = self
            .records()
            .filter(|record| keep(record))
            .map(|record| record.cells().to_vec())
            .collect();
        Self::new(self.columns.clone(), rows)
    }

    /// Returns a copy with `column` appended, one value per row.
    pub fn with_column(&self, column: &str, values: Vec<CellValue>) -> Self {
        let mut columns = self.columns.clone();
        columns.push(column.to_string());
        let rows = self
            .rows
            .iter()
            .zip(values.into_iter().chain(std::iter::repeat(CellValue::Empty)))
            .map(|(row, value)| {
                let mut row = row.clone();
                row.push(value);
                row
            })
            .collect();
        Self::new(columns, rows)
    }
}

/// Read-only view of one row, addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    dataset: &'a Dataset,
    row: usize,
    cells: &'a [CellValue],
}

impl<'a> Record<'a> {
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn cells(&self) -> &'a [CellValue] {
        self.cells
    }

    /// Unknown columns read as `Empty`.
    pub fn get(&self, column: &str) -> &'a CellValue {
        self.dataset
            .column_index(column)
            .and_then(|position| self.cells.get(position))
            .unwrap_or(&EMPTY)
    }
}
