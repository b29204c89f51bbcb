use std::path::PathBuf;

use thiserror::Error;

use crate::types::Field;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Unknown provider '{name}' (supported: {supported})")]
    UnknownProvider { name: String, supported: String },

    #[error("No data header found in {provider} input")]
    DataNotFound { provider: String },

    #[error("{provider}: input line {line}: bad {field}: {kind}; row: {row:?}")]
    Extraction {
        provider: String,
        line: u64,
        field: Field,
        kind: ExtractionErrorKind,
        row: Vec<String>,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error on {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// What exactly was wrong with a data row field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionErrorKind {
    #[error("column {column} missing (row has {len} fields)")]
    MissingColumn { column: usize, len: usize },

    #[error("field is empty")]
    EmptyField,

    #[error("'{value}' is not a numeric dialing prefix")]
    InvalidPrefix { value: String },

    #[error("'{value}' is not a decimal number")]
    InvalidRate { value: String },

    #[error("no currency amount found in '{value}'")]
    RateNotFound { value: String },

    #[error("'{value}' does not match date format '{format}'")]
    InvalidDate { value: String, format: String },
}

impl ConvertError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io { path: path.into(), source }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        ConvertError::Csv { path: path.into(), source }
    }

    /// Short label for counters and log fields
    pub fn kind_label(&self) -> &'static str {
        match self {
            ConvertError::UnknownProvider { .. } => "usage",
            ConvertError::DataNotFound { .. } => "data_not_found",
            ConvertError::Extraction { .. } => "extraction",
            ConvertError::Io { .. } => "io",
            ConvertError::Csv { .. } => "csv",
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
