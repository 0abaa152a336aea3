use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("configuration error: sample row {index} is out of bounds for {rows} data row(s)")]
    SampleRowOutOfBounds { index: usize, rows: usize },

    #[error("configuration error: column not found: {0}")]
    MissingColumn(String),

    #[error("configuration error: sheet not found: {0}")]
    SheetNotFound(String),

    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("sheet is empty: {0}")]
    EmptySheet(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("workbook read error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("workbook write error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),
}

impl ScoreError {
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::SampleRowOutOfBounds { .. }
                | Self::MissingColumn(_)
                | Self::SheetNotFound(_)
                | Self::ConfigNotFound(_)
                | Self::ConfigParse(_)
                | Self::Toml(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ScoreError>;
