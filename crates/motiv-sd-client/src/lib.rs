//! Client for the Stable Diffusion img2img service.
//!
//! This crate owns exactly one concern: turning (photo bytes, style,
//! frame index, parameters) into one generated image payload via the
//! external generation API. Retry and skip policy belong to the
//! pipeline orchestrator, not here.

pub mod client;
pub mod error;
pub mod types;

pub use client::{SdClient, SdClientConfig};
pub use error::{SdError, SdResult};
pub use types::{Img2ImgRequest, Img2ImgResponse};
