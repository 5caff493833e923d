//! Run-fatal pipeline errors.
//!
//! Per-frame failures never show up here: they are caught at the frame
//! boundary by the runner and recorded. Everything in this enum aborts
//! the run.

use motiv_files::FileError;
use motiv_media::MediaError;
use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to acquire source photo: {0}")]
    SourceAcquisition(#[source] FileError),

    #[error("insufficient frames: generated {achieved}, need {required}")]
    InsufficientFrames { achieved: u32, required: u32 },

    #[error("video assembly failed: {0}")]
    Assembly(#[from] MediaError),

    #[error("invalid run configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
