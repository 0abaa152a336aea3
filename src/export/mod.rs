pub mod writer;

use crate::error::Result;
use crate::scoring::analytics;
use crate::scoring::ScoredDataset;
use crate::types::config::FieldConfig;
use crate::types::report::ScoreRow;
use std::fs;
use std::path::{Path, PathBuf};

/// `{base}_{sheet}.xlsx`, or `{base}_{sheet}_{filter}.xlsx` for a filtered export.
pub fn file_name(base: &str, sheet: &str, filter: Option<&str>) -> String {
    match filter {
        Some(value) => format!(
            "{}_{}_{}.xlsx",
            sanitize(base),
            sanitize(sheet),
            sanitize(value)
        ),
        None => format!("{}_{}.xlsx", sanitize(base), sanitize(sheet)),
    }
}

fn sanitize(component: &str) -> String {
    component
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Which rows and columns an export carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Company, year, sector and the two scores.
    Summary,
    /// Every source column plus the two scores.
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectorFilter {
    All,
    One(String),
    Each,
}

/// Destination and naming inputs shared by every file of one export run.
pub struct ExportTarget<'a> {
    pub out_dir: &'a Path,
    pub base: &'a str,
    pub sheet: &'a str,
}

impl ExportTarget<'_> {
    fn path_for(&self, filter: Option<&str>) -> PathBuf {
        self.out_dir.join(file_name(self.base, self.sheet, filter))
    }
}

/// Writes the requested export file(s) and returns their paths.
pub fn export(
    target: &ExportTarget<'_>,
    scored: &ScoredDataset,
    rows: &[ScoreRow],
    fields: &FieldConfig,
    scope: Scope,
    filter: &SectorFilter,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(target.out_dir)?;

    let sectors: Vec<Option<String>> = match filter {
        SectorFilter::All => vec![None],
        SectorFilter::One(sector) => vec![Some(sector.clone())],
        SectorFilter::Each => analytics::partition_by_sector(rows)
            .into_keys()
            .map(Some)
            .collect(),
    };

    let augmented = match scope {
        Scope::Full => Some(scored.augmented()),
        Scope::Summary => None,
    };

    let mut written = Vec::with_capacity(sectors.len());
    for sector in sectors {
        let path = target.path_for(sector.as_deref());
        match scope {
            Scope::Summary => {
                let subset = match &sector {
                    Some(value) => analytics::filter_by_sector(rows, value),
                    None => rows.to_vec(),
                };
                if subset.is_empty() {
                    tracing::warn!(sector = ?sector, "export contains no rows");
                }
                writer::write_score_rows(&path, &subset, fields)?;
            }
            Scope::Full => {
                let Some(augmented) = &augmented else {
                    continue;
                };
                let subset = match &sector {
                    Some(value) => augmented.filter(|record| {
                        let cell = record.get(&fields.sector);
                        !cell.is_missing() && cell.to_string() == *value
                    }),
                    None => augmented.clone(),
                };
                if subset.row_count() == 0 {
                    tracing::warn!(sector = ?sector, "export contains no rows");
                }
                writer::write_dataset(&path, &subset)?;
            }
        }
        written.push(path);
    }
    Ok(written)
}
