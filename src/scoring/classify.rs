use crate::error::{Result, ScoreError};
use crate::types::config::ScoringConfig;
use crate::types::dataset::{CellValue, Dataset};
use crate::types::scoring::{CategoryAssignment, ColumnKind};

/// Infers the category of one sample value. Checked in order binary, range, list.
pub fn classify_value(value: &CellValue, rules: &ScoringConfig) -> ColumnKind {
    if is_binary(value, rules) {
        ColumnKind::Binary
    } else if is_range(value, rules) {
        ColumnKind::Range
    } else if is_list(value, rules) {
        ColumnKind::List
    } else {
        ColumnKind::Unclassified
    }
}

fn is_binary(value: &CellValue, rules: &ScoringConfig) -> bool {
    value
        .as_text()
        .is_some_and(|text| rules.binary_labels.iter().any(|label| label == text))
}

// Numeric cells only: the text "2" is not a rank.
fn is_range(value: &CellValue, rules: &ScoringConfig) -> bool {
    match value {
        CellValue::Int(rank) => (rules.range_min..=rules.range_max).contains(rank),
        CellValue::Float(rank) => {
            rank.fract() == 0.0
                && *rank >= rules.range_min as f64
                && *rank <= rules.range_max as f64
        }
        _ => false,
    }
}

fn is_list(value: &CellValue, rules: &ScoringConfig) -> bool {
    value
        .as_text()
        .is_some_and(|text| text.contains(rules.list_marker.as_str()))
}

/// Partitions the dataset's columns using the values of row `sample_row`.
pub fn classify(
    dataset: &Dataset,
    sample_row: usize,
    rules: &ScoringConfig,
) -> Result<CategoryAssignment> {
    let sample = dataset
        .record(sample_row)
        .ok_or(ScoreError::SampleRowOutOfBounds {
            index: sample_row,
            rows: dataset.row_count(),
        })?;

    let mut assignment = CategoryAssignment::default();
    for (column, value) in dataset.columns().iter().zip(sample.cells()) {
        match classify_value(value, rules) {
            ColumnKind::Binary => assignment.binary.push(column.clone()),
            ColumnKind::Range => assignment.range.push(column.clone()),
            ColumnKind::List => assignment.list.push(column.clone()),
            ColumnKind::Unclassified => {
                tracing::debug!(column = %column, value = %value, "column left unclassified");
            }
        }
    }

    tracing::info!(
        sample_row,
        binary = assignment.binary.len(),
        range = assignment.range.len(),
        list = assignment.list.len(),
        "columns classified"
    );
    Ok(assignment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    fn dataset(sample: Vec<CellValue>) -> Dataset {
        Dataset::new(
            vec!["A".into(), "B".into(), "C".into(), "D".into()],
            vec![
                vec![text("No"), CellValue::Int(1), text("x"), text("P1")],
                sample,
            ],
        )
    }

    #[test]
    fn every_binary_label_is_recognised() {
        let rules = ScoringConfig::default();
        for label in [
            "Yes",
            "No",
            "Not clear/Not mentioned",
            "Not clear",
            "Not clear/Not mentioned/NA",
        ] {
            assert_eq!(classify_value(&text(label), &rules), ColumnKind::Binary);
        }
        assert_eq!(classify_value(&text("yes"), &rules), ColumnKind::Unclassified);
        assert_eq!(classify_value(&text("Yes "), &rules), ColumnKind::Unclassified);
    }

    #[test]
    fn range_requires_a_numeric_cell_within_the_scale() {
        let rules = ScoringConfig::default();
        assert_eq!(classify_value(&CellValue::Int(3), &rules), ColumnKind::Range);
        assert_eq!(classify_value(&CellValue::Float(4.0), &rules), ColumnKind::Range);
        assert_eq!(classify_value(&CellValue::Float(2.5), &rules), ColumnKind::Unclassified);
        assert_eq!(classify_value(&CellValue::Int(5), &rules), ColumnKind::Unclassified);
        assert_eq!(classify_value(&CellValue::Int(0), &rules), ColumnKind::Unclassified);
        assert_eq!(classify_value(&text("2"), &rules), ColumnKind::Unclassified);
    }

    #[test]
    fn list_requires_marker_substring() {
        let rules = ScoringConfig::default();
        assert_eq!(classify_value(&text("P1, P3"), &rules), ColumnKind::List);
        assert_eq!(classify_value(&text("P2,P11"), &rules), ColumnKind::List);
        assert_eq!(classify_value(&text("P2,P3"), &rules), ColumnKind::Unclassified);
        assert_eq!(classify_value(&CellValue::Empty, &rules), ColumnKind::Unclassified);
    }

    #[test]
    fn classify_uses_only_the_sample_row() {
        let rules = ScoringConfig::default();
        let data = dataset(vec![
            text("Yes"),
            CellValue::Float(2.0),
            text("P1,P2"),
            CellValue::Empty,
        ]);

        let assignment = classify(&data, 1, &rules).expect("sample row should exist");
        assert_eq!(assignment.binary, vec!["A"]);
        assert_eq!(assignment.range, vec!["B"]);
        assert_eq!(assignment.list, vec!["C"]);
        assert_eq!(assignment.total_possible(), 3);
        assert_eq!(assignment.kind_of("D"), ColumnKind::Unclassified);
    }

    #[test]
    fn classify_is_idempotent() {
        let rules = ScoringConfig::default();
        let data = dataset(vec![text("No"), CellValue::Int(4), text("P1"), text("Yes")]);
        let first = classify(&data, 1, &rules).expect("classification should succeed");
        let second = classify(&data, 1, &rules).expect("classification should succeed");
        assert_eq!(first, second);
    }

    #[test]
    fn classify_rejects_out_of_bounds_sample_row() {
        let rules = ScoringConfig::default();
        let single = Dataset::new(vec!["A".into()], vec![vec![text("Yes")]]);
        let err = classify(&single, 1, &rules).expect_err("one data row cannot serve row 1");
        assert!(matches!(
            err,
            ScoreError::SampleRowOutOfBounds { index: 1, rows: 1 }
        ));
    }

    #[test]
    fn custom_rules_change_recognised_values() {
        let rules = ScoringConfig {
            binary_labels: vec!["Oui".into(), "Non".into()],
            positive_label: "Oui".into(),
            range_max: 5,
            list_marker: "Q1".into(),
            ..ScoringConfig::default()
        };
        assert_eq!(classify_value(&text("Oui"), &rules), ColumnKind::Binary);
        assert_eq!(classify_value(&text("Yes"), &rules), ColumnKind::Unclassified);
        assert_eq!(classify_value(&CellValue::Int(5), &rules), ColumnKind::Range);
        assert_eq!(classify_value(&text("Q1,Q2"), &rules), ColumnKind::List);
    }
}
