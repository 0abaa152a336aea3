use crate::types::dataset::CellValue;
use calamine::Data;
use std::collections::HashMap;

/// Text cells that dataframe readers load as NaN by default. Matched exactly,
/// so a label such as `Not clear/Not mentioned/NA` stays text.
pub const NA_TOKENS: [&str; 19] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null", "",
];

pub fn to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(text) if text.trim().is_empty() || NA_TOKENS.contains(&text.as_str()) => {
            CellValue::Empty
        }
        Data::String(text) => CellValue::Text(text.clone()),
        Data::Int(value) => CellValue::Int(*value),
        Data::Float(value) => CellValue::Float(*value),
        // Booleans compare equal to 0 and 1, so a TRUE sample classifies as a rank.
        Data::Bool(value) => CellValue::Int(i64::from(*value)),
        Data::DateTime(value) => CellValue::Float(value.as_f64()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::Text(text.clone()),
    }
}

/// Header names as dataframe readers produce them: blanks become
/// `Unnamed: {position}`, repeats get a `.{n}` suffix.
pub fn header_names(header: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    header
        .iter()
        .enumerate()
        .map(|(position, data)| {
            let name = match to_cell(data) {
                CellValue::Empty => format!("Unnamed: {position}"),
                CellValue::Text(text) if text.trim().is_empty() => format!("Unnamed: {position}"),
                other => other.to_string(),
            };
            let count = seen.entry(name.clone()).or_insert(0);
            let unique = if *count == 0 {
                name
            } else {
                format!("{name}.{count}")
            };
            *count += 1;
            unique
        })
        .collect()
}
