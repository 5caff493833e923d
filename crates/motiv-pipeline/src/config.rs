//! Run configuration.

use std::path::PathBuf;

use motiv_models::GenerationParams;

use crate::error::{PipelineError, PipelineResult};

/// Configuration for one generation run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Number of frame attempts per run.
    pub frame_count: u32,
    /// Fraction of frames that must succeed, in (0, 1].
    pub min_success_fraction: f64,
    /// Output video frame rate.
    pub frame_rate: u32,
    /// Directory for finished videos.
    pub output_dir: PathBuf,
    /// Generation parameters applied to every frame.
    pub params: GenerationParams,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frame_count: 8,
            min_success_fraction: 0.5,
            frame_rate: motiv_media::DEFAULT_FRAME_RATE,
            output_dir: PathBuf::from("output"),
            params: GenerationParams::default(),
        }
    }
}

impl RunConfig {
    /// Create config from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            frame_count: env_parse("FRAME_COUNT").unwrap_or(defaults.frame_count),
            min_success_fraction: env_parse("MIN_SUCCESS_FRACTION")
                .unwrap_or(defaults.min_success_fraction),
            frame_rate: env_parse("FRAME_RATE").unwrap_or(defaults.frame_rate),
            output_dir: std::env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            params: defaults.params,
        }
    }

    /// Minimum number of successful frames required for assembly.
    pub fn quorum(&self) -> u32 {
        (self.frame_count as f64 * self.min_success_fraction).ceil() as u32
    }

    /// Reject configurations that can never produce a valid run.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.frame_count == 0 {
            return Err(PipelineError::InvalidConfig(
                "frame_count must be at least 1".to_string(),
            ));
        }
        if !(self.min_success_fraction > 0.0 && self.min_success_fraction <= 1.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "min_success_fraction must be in (0, 1], got {}",
                self.min_success_fraction
            )));
        }
        if self.frame_rate == 0 {
            return Err(PipelineError::InvalidConfig(
                "frame_rate must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}
