// crates/salary-core/src/error.rs

use salary_parser::RecordError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Configuration TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Column '{0}' not found in table header")]
    MissingColumn(String),

    #[error("Worksheet '{0}' not found")]
    MissingSheet(String),

    #[error("Workbook does not contain any worksheets")]
    EmptyWorkbook,

    #[error("Row {index}: {source}")]
    Format {
        index: i64,
        #[source]
        source: RecordError,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
