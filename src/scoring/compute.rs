use crate::types::config::{RangePolicy, ScoringConfig};
use crate::types::dataset::{CellValue, Record};
use crate::types::scoring::{CategoryAssignment, DataQualityWarning, RowScore, Score, WarningKind};

/// Scores one row. Missing cells contribute nothing; malformed cells
/// contribute according to `rules.range_policy` and are reported in `warnings`.
pub fn score_record(
    record: &Record<'_>,
    assignment: &CategoryAssignment,
    rules: &ScoringConfig,
    warnings: &mut Vec<DataQualityWarning>,
) -> RowScore {
    let mut score = RowScore::default();

    for column in &assignment.binary {
        if record.get(column).as_text() == Some(rules.positive_label.as_str()) {
            score.binary += 1.0;
        }
    }

    for column in &assignment.range {
        let value = record.get(column);
        if value.is_missing() {
            continue;
        }
        match range_contribution(value, rules) {
            Ok((contribution, None)) => score.range += contribution,
            Ok((contribution, Some(kind))) => {
                score.range += contribution;
                warnings.push(warning(record, column, kind));
            }
            Err(kind) => warnings.push(warning(record, column, kind)),
        }
    }

    for column in &assignment.list {
        let value = record.get(column);
        if value.is_missing() {
            continue;
        }
        match value.as_text() {
            Some(text) => score.list += list_contribution(text, rules),
            None => warnings.push(warning(
                record,
                column,
                WarningKind::ListNotText {
                    value: value.to_string(),
                },
            )),
        }
    }

    score
}

fn warning(record: &Record<'_>, column: &str, kind: WarningKind) -> DataQualityWarning {
    let warning = DataQualityWarning {
        row: record.row(),
        column: column.to_string(),
        kind,
    };
    tracing::warn!("{warning}");
    warning
}

/// Integer cast of a range cell: numbers truncate, text must parse as an integer.
/// Floats beyond the `i64` range have no integer value and yield `None`.
pub fn rank_of(value: &CellValue) -> Option<i64> {
    match value {
        CellValue::Int(rank) => Some(*rank),
        CellValue::Float(rank) if (i64::MIN as f64..i64::MAX as f64).contains(&rank.trunc()) => {
            Some(rank.trunc() as i64)
        }
        CellValue::Text(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Linear map of `rank` onto [0, 1] over the answer scale. Computed in
/// floating point so extreme ranks cannot overflow.
pub fn normalized_rank(rank: i64, rules: &ScoringConfig) -> Score {
    let min = rules.range_min as Score;
    (rank as Score - min) / (rules.range_max as Score - min)
}

type Contribution = std::result::Result<(Score, Option<WarningKind>), WarningKind>;

fn range_contribution(value: &CellValue, rules: &ScoringConfig) -> Contribution {
    let rank = rank_of(value).ok_or_else(|| WarningKind::RangeNotInteger {
        value: value.to_string(),
    })?;
    if (rules.range_min..=rules.range_max).contains(&rank) {
        return Ok((normalized_rank(rank, rules), None));
    }

    let out_of_bounds = WarningKind::RangeOutOfBounds { value: rank };
    match rules.range_policy {
        RangePolicy::Lenient => Ok((normalized_rank(rank, rules), Some(out_of_bounds))),
        RangePolicy::Clamp => Ok((
            normalized_rank(rank.clamp(rules.range_min, rules.range_max), rules),
            Some(out_of_bounds),
        )),
        RangePolicy::Skip => Err(out_of_bounds),
    }
}

/// Item count over the selectable maximum. No trimming: `"P1, P2"` has two items.
pub fn list_contribution(text: &str, rules: &ScoringConfig) -> Score {
    let items = text.split(rules.list_separator.as_str()).count();
    items as Score / rules.list_max_items as Score
}
