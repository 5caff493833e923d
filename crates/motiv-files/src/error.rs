//! File retrieval error types.

use thiserror::Error;

pub type FileResult<T> = Result<T, FileError>;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("file API rejected request: {description}")]
    Api { description: String },

    #[error("file API returned no file path for the reference")]
    MissingPath,

    #[error("file download returned status {status}")]
    Status { status: u16 },

    #[error("downloaded file is empty")]
    Empty,

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
}
