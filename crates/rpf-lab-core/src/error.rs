use thiserror::Error;

#[derive(Error, Debug)]
pub enum RpfLabError {
    #[error("Duplicate row for dataset '{dataset}' and method '{method}'")]
    DuplicateRecord { dataset: String, method: String },

    #[error("Empty {field} name in row {row}")]
    EmptyName { field: &'static str, row: usize },

    #[error("{column} in row {row} is not a finite number")]
    NonFinite { column: &'static str, row: usize },

    #[error("{column} in row {row} is {value}, expected a value in [{min}, {max}]")]
    OutOfRange {
        column: &'static str,
        row: usize,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Unknown page: {0}")]
    UnknownPage(String),

    #[error("Unknown table view: {0}")]
    UnknownView(String),

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RpfLabError>;
