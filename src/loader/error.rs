use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open storm data file '{0}'")]
    SourceOpen(PathBuf, #[source] std::io::Error),

    // Errors while streaming the compressed file through its decoder
    #[error("Failed to read or decompress storm data file '{0}'")]
    Decompress(PathBuf, #[source] std::io::Error),

    #[error("Parsing error processing CSV data from '{path}'")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Required column '{column}' not found in '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to write downloaded data to '{0}'")]
    DownloadWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to read event type lookup '{0}'")]
    LookupRead(PathBuf, #[source] std::io::Error),

    #[error("Line {line} of event type lookup '{path}' is too short to hold a name and a 2-character code: {content:?}")]
    LookupLine {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
