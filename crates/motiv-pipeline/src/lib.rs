//! Photo-to-video generation pipeline.
//!
//! This crate provides:
//! - The run orchestrator: download source photo, generate frames,
//!   enforce the success quorum, assemble the video
//! - Seam traits for the frame generator, source fetcher, and progress
//!   sink so the orchestration logic is testable in isolation
//! - Run configuration and the run-fatal error taxonomy
//!
//! Per-frame failures are recorded and skipped; only source
//! acquisition, quorum, and assembly failures abort a run.

pub mod config;
pub mod error;
pub mod progress;
pub mod runner;
pub mod traits;

pub use config::RunConfig;
pub use error::{PipelineError, PipelineResult};
pub use progress::{LogProgress, NoopProgress, ProgressSink};
pub use runner::Pipeline;
pub use traits::{FrameGenerator, SourceFetcher};
