pub mod cells;

use crate::error::{Result, ScoreError};
use crate::types::dataset::{CellValue, Dataset};
use calamine::{open_workbook_auto, Reader};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// A sheet read into memory, with the provenance the report needs.
#[derive(Debug, Clone)]
pub struct LoadedSheet {
    pub path: PathBuf,
    pub sheet: String,
    pub sha256: String,
    pub dropped_columns: Vec<String>,
    pub dataset: Dataset,
}

impl LoadedSheet {
    /// File stem used to name exports.
    pub fn base_name(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "scores".to_string())
    }
}

/// Reads `selector` (sheet name, or zero-based index) from the workbook at
/// `path`, using the first row as header, then drops `drop_columns`.
pub fn load(path: &Path, selector: &str, drop_columns: &[String]) -> Result<LoadedSheet> {
    if !path.exists() {
        return Err(ScoreError::PathNotFound(path.display().to_string()));
    }
    let sha256 = sha256_hex(&std::fs::read(path)?);

    let mut workbook = open_workbook_auto(path)?;
    let sheet = resolve_sheet(&workbook.sheet_names(), selector)?;
    let range = workbook.worksheet_range(&sheet)?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| ScoreError::EmptySheet(sheet.clone()))?;
    let columns = cells::header_names(header);
    let data: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(cells::to_cell).collect())
        .collect();

    let mut dataset = Dataset::new(columns, data);
    let dropped_columns = dataset.drop_columns(drop_columns);
    tracing::info!(
        path = %path.display(),
        sheet = %sheet,
        rows = dataset.row_count(),
        columns = dataset.columns().len(),
        dropped = ?dropped_columns,
        "sheet loaded"
    );

    Ok(LoadedSheet {
        path: path.to_path_buf(),
        sheet,
        sha256,
        dropped_columns,
        dataset,
    })
}

/// Exact sheet names win; an all-digit selector falls back to a position.
pub fn resolve_sheet(names: &[String], selector: &str) -> Result<String> {
    if let Some(name) = names.iter().find(|name| name.as_str() == selector) {
        return Ok(name.clone());
    }
    selector
        .parse::<usize>()
        .ok()
        .and_then(|position| names.get(position))
        .cloned()
        .ok_or_else(|| {
            ScoreError::SheetNotFound(format!(
                "{selector} (available: {})",
                names.join(", ")
            ))
        })
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:x}")
}
