use crate::loader::error::LoadError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StormError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Failed processing DataFrame: {0}")]
    PolarsError(#[from] PolarsError),

    #[error("Quantile level {0} is outside [0, 1]")]
    InvalidQuantile(f64),

    #[error("Failed to create output directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to write report file '{0}'")]
    ReportWrite(PathBuf, #[source] std::io::Error),
}
