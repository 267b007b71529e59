use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read CSV file '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Failed to write CSV file '{0}'")]
    CsvWrite(PathBuf, #[source] PolarsError),

    #[error("Failed to create file '{0}'")]
    FileCreate(PathBuf, #[source] std::io::Error),

    #[error("Failed to create directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),
}
