use crate::error::ScoreError;
use serde::Deserialize;

/// Default sheet name of the survey workbooks this tool was built around.
pub const DEFAULT_SHEET: &str = "Sheet4";

/// Second data row; the first row of the survey exports is often a template answer.
pub const DEFAULT_SAMPLE_ROW: usize = 1;

/// Lowest rank of the ordinal answer scale (maps to 0.0).
pub const RANGE_MIN: i64 = 1;

/// Highest rank of the ordinal answer scale (maps to 1.0).
pub const RANGE_MAX: i64 = 4;

/// Number of selectable principles (P1..P9) in a multi-select answer.
/// A list answer naming all of them scores 1.0.
pub const LIST_MAX_ITEMS: u32 = 9;

pub const LIST_MARKER: &str = "P1";
pub const LIST_SEPARATOR: &str = ",";
pub const POSITIVE_LABEL: &str = "Yes";

pub const BINARY_LABELS: [&str; 5] = [
    "Yes",
    "No",
    "Not clear/Not mentioned",
    "Not clear",
    "Not clear/Not mentioned/NA",
];

pub const DEFAULT_DROP_COLUMNS: [&str; 2] = ["Unnamed: 0", "Timestamp"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrrConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub fields: FieldConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_sheet")]
    pub sheet: String,
    #[serde(default = "default_drop_columns")]
    pub drop_columns: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            sheet: default_sheet(),
            drop_columns: default_drop_columns(),
        }
    }
}

fn default_sheet() -> String {
    DEFAULT_SHEET.to_string()
}

fn default_drop_columns() -> Vec<String> {
    DEFAULT_DROP_COLUMNS.iter().map(|s| s.to_string()).collect()
}

/// What to do with a range answer outside `range_min..=range_max`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangePolicy {
    /// Normalize the truncated value as-is and record a warning.
    #[default]
    Lenient,
    /// Clamp into bounds and record a warning.
    Clamp,
    /// Contribute nothing and record a warning.
    Skip,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_sample_row")]
    pub sample_row: usize,
    #[serde(default = "default_binary_labels")]
    pub binary_labels: Vec<String>,
    #[serde(default = "default_positive_label")]
    pub positive_label: String,
    #[serde(default = "default_range_min")]
    pub range_min: i64,
    #[serde(default = "default_range_max")]
    pub range_max: i64,
    #[serde(default = "default_list_marker")]
    pub list_marker: String,
    #[serde(default = "default_list_separator")]
    pub list_separator: String,
    #[serde(default = "default_list_max_items")]
    pub list_max_items: u32,
    #[serde(default)]
    pub range_policy: RangePolicy,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            sample_row: default_sample_row(),
            binary_labels: default_binary_labels(),
            positive_label: default_positive_label(),
            range_min: default_range_min(),
            range_max: default_range_max(),
            list_marker: default_list_marker(),
            list_separator: default_list_separator(),
            list_max_items: default_list_max_items(),
            range_policy: RangePolicy::default(),
        }
    }
}

fn default_sample_row() -> usize {
    DEFAULT_SAMPLE_ROW
}

fn default_binary_labels() -> Vec<String> {
    BINARY_LABELS.iter().map(|s| s.to_string()).collect()
}

fn default_positive_label() -> String {
    POSITIVE_LABEL.to_string()
}

fn default_range_min() -> i64 {
    RANGE_MIN
}

fn default_range_max() -> i64 {
    RANGE_MAX
}

fn default_list_marker() -> String {
    LIST_MARKER.to_string()
}

fn default_list_separator() -> String {
    LIST_SEPARATOR.to_string()
}

fn default_list_max_items() -> u32 {
    LIST_MAX_ITEMS
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldConfig {
    #[serde(default = "default_company")]
    pub company: String,
    #[serde(default = "default_year")]
    pub year: String,
    #[serde(default = "default_sector")]
    pub sector: String,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            company: default_company(),
            year: default_year(),
            sector: default_sector(),
        }
    }
}

fn default_company() -> String {
    "NAME OF THE COMPANY".to_string()
}

fn default_year() -> String {
    "YEAR OF REPORTING".to_string()
}

fn default_sector() -> String {
    "SECTOR".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            histogram_bins: default_histogram_bins(),
        }
    }
}

fn default_top_n() -> usize {
    5
}

fn default_histogram_bins() -> usize {
    20
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportConfig {
    pub out_dir: Option<String>,
}

impl BrrConfig {
    pub fn validate(&self) -> Result<(), ScoreError> {
        let scoring = &self.scoring;
        if scoring.range_max <= scoring.range_min {
            return Err(ScoreError::ConfigParse(format!(
                "scoring.range_max ({}) must be greater than scoring.range_min ({})",
                scoring.range_max, scoring.range_min
            )));
        }
        if scoring.list_max_items == 0 {
            return Err(ScoreError::ConfigParse(
                "scoring.list_max_items must be greater than 0".to_string(),
            ));
        }
        if scoring.list_separator.is_empty() {
            return Err(ScoreError::ConfigParse(
                "scoring.list_separator cannot be empty".to_string(),
            ));
        }
        if scoring.list_marker.is_empty() {
            return Err(ScoreError::ConfigParse(
                "scoring.list_marker cannot be empty".to_string(),
            ));
        }
        if !scoring.binary_labels.contains(&scoring.positive_label) {
            return Err(ScoreError::ConfigParse(format!(
                "scoring.positive_label {:?} must be one of scoring.binary_labels",
                scoring.positive_label
            )));
        }
        if self.analytics.histogram_bins == 0 {
            return Err(ScoreError::ConfigParse(
                "analytics.histogram_bins must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
