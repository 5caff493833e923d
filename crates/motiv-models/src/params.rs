//! Numeric generation parameters.

use serde::{Deserialize, Serialize};

/// Fixed parameters for one img2img request.
///
/// Values are deliberately small: the output is a short animated clip,
/// not a print-quality render, and generation time scales with all of
/// these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Output image width in pixels.
    pub width: u32,
    /// Output image height in pixels.
    pub height: u32,
    /// Diffusion step count.
    pub steps: u32,
    /// Denoising strength, 0.0..=1.0.
    pub denoising_strength: f64,
    /// Classifier-free guidance scale.
    pub cfg_scale: f64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            steps: 10,
            denoising_strength: 0.5,
            cfg_scale: 7.0,
        }
    }
}
