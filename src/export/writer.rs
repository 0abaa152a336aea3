use crate::error::{Result, ScoreError};
use crate::scoring::{CALCULATED_SCORE_COLUMN, PERCENTAGE_SCORE_COLUMN};
use crate::types::config::FieldConfig;
use crate::types::dataset::{CellValue, Dataset};
use crate::types::report::{Period, ScoreRow};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::Path;

const SHEET_NAME: &str = "Scores";

/// Writes the company-year view: company, year, calculated score, sector,
/// percentage score.
pub fn write_score_rows(path: &Path, rows: &[ScoreRow], fields: &FieldConfig) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let headers = [
        fields.company.as_str(),
        fields.year.as_str(),
        CALCULATED_SCORE_COLUMN,
        fields.sector.as_str(),
        PERCENTAGE_SCORE_COLUMN,
    ];
    write_header(worksheet, &headers)?;

    for (index, row) in rows.iter().enumerate() {
        let line = row_number(index + 1)?;
        worksheet.write_string(line, 0, &row.company)?;
        match &row.year {
            Period::Year(year) => worksheet.write_number(line, 1, *year as f64)?,
            Period::Label(label) => worksheet.write_string(line, 1, label)?,
        };
        worksheet.write_number(line, 2, row.calculated_score)?;
        worksheet.write_string(line, 3, &row.sector)?;
        worksheet.write_number(line, 4, row.percentage_score)?;
    }

    workbook.save(path)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "score rows exported");
    Ok(())
}

/// Writes every column of `dataset`, header first.
pub fn write_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let headers: Vec<&str> = dataset.columns().iter().map(String::as_str).collect();
    write_header(worksheet, &headers)?;

    for record in dataset.records() {
        let line = row_number(record.row() + 1)?;
        for (position, cell) in record.cells().iter().enumerate() {
            let column = column_number(position)?;
            match cell {
                CellValue::Text(text) => {
                    worksheet.write_string(line, column, text)?;
                }
                CellValue::Int(value) => {
                    worksheet.write_number(line, column, *value as f64)?;
                }
                CellValue::Float(value) if value.is_finite() => {
                    worksheet.write_number(line, column, *value)?;
                }
                CellValue::Float(_) | CellValue::Empty => {}
            }
        }
    }

    workbook.save(path)?;
    tracing::info!(
        path = %path.display(),
        rows = dataset.row_count(),
        columns = dataset.columns().len(),
        "dataset exported"
    );
    Ok(())
}

fn write_header(worksheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    let bold = Format::new().set_bold();
    for (position, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, column_number(position)?, *header, &bold)?;
    }
    Ok(())
}

fn row_number(index: usize) -> Result<u32> {
    u32::try_from(index).map_err(|_| ScoreError::Export(XlsxError::RowColumnLimitError))
}

fn column_number(index: usize) -> Result<u16> {
    u16::try_from(index).map_err(|_| ScoreError::Export(XlsxError::RowColumnLimitError))
}
