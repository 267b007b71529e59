use crate::dataset::error::DatasetError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Insufficient data for {operation}: need at least {required} records, found {found}")]
    InsufficientData {
        operation: &'static str,
        required: usize,
        found: usize,
    },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("Failed to read generator config '{0}'")]
    ConfigRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse generator config '{0}'")]
    ConfigParse(PathBuf, #[source] serde_json::Error),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Failed to resolve date value")]
    DateParsingError,
}

impl WeatherError {
    pub(crate) fn insufficient(operation: &'static str, required: usize, found: usize) -> Self {
        WeatherError::InsufficientData {
            operation,
            required,
            found,
        }
    }
}
