//! Generation client error types.

use motiv_models::UnknownStyle;
use thiserror::Error;

pub type SdResult<T> = Result<T, SdError>;

#[derive(Debug, Error)]
pub enum SdError {
    #[error(transparent)]
    UnknownStyle(#[from] UnknownStyle),

    #[error("generation service returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generation service returned no images")]
    EmptyResult,

    #[error("image payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl SdError {
    /// Whether a frame attempt hitting this error could plausibly
    /// succeed on a later attempt. An unknown style never will.
    pub fn is_transient(&self) -> bool {
        !matches!(self, SdError::UnknownStyle(_))
    }
}
