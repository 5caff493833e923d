//! Shared data models for the Motiv generation core.
//!
//! This crate provides Serde-serializable types for:
//! - The style catalog (configured finite set of visual styles)
//! - Generation parameters sent to the image service
//! - Run identifiers and per-frame results

pub mod frame;
pub mod params;
pub mod run;
pub mod style;

// Re-export common types
pub use frame::{FrameFailure, FrameResult};
pub use params::GenerationParams;
pub use run::RunId;
pub use style::{StyleCatalog, StyleSpec, UnknownStyle};
