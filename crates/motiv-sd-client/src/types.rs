//! Wire types for the img2img endpoint.

use motiv_models::GenerationParams;
use serde::{Deserialize, Serialize};

/// Negative prompt applied to every frame.
pub const NEGATIVE_PROMPT: &str = "blurry, lowres, bad anatomy, ugly, text, watermark";

/// Request body for `POST /sdapi/v1/img2img`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Img2ImgRequest {
    /// Base64-encoded source images. Always exactly one entry here.
    pub init_images: Vec<String>,
    /// Positive prompt: style fragment plus frame tag.
    pub prompt: String,
    /// Negative prompt.
    pub negative_prompt: String,
    /// Diffusion step count.
    pub steps: u32,
    /// Denoising strength.
    pub denoising_strength: f64,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Guidance scale.
    pub cfg_scale: f64,
}

impl Img2ImgRequest {
    /// Build the request for one frame.
    ///
    /// The frame index is folded into the prompt so successive frames
    /// drift slightly, which is what animates the output.
    pub fn for_frame(
        photo_base64: String,
        style_prompt: &str,
        frame_index: u32,
        params: &GenerationParams,
    ) -> Self {
        Self {
            init_images: vec![photo_base64],
            prompt: format!("{}, frame {}", style_prompt, frame_index),
            negative_prompt: NEGATIVE_PROMPT.to_string(),
            steps: params.steps,
            denoising_strength: params.denoising_strength,
            width: params.width,
            height: params.height,
            cfg_scale: params.cfg_scale,
        }
    }
}

/// Response body from `POST /sdapi/v1/img2img`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Img2ImgResponse {
    /// Zero or more base64-encoded output images.
    #[serde(default)]
    pub images: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_frame_prompt() {
        let req = Img2ImgRequest::for_frame(
            "aGVsbG8=".to_string(),
            "anime style, cel shading",
            3,
            &GenerationParams::default(),
        );
        assert_eq!(req.prompt, "anime style, cel shading, frame 3");
        assert_eq!(req.negative_prompt, NEGATIVE_PROMPT);
        assert_eq!(req.init_images.len(), 1);
        assert_eq!(req.steps, 10);
        assert_eq!(req.width, 256);
    }

    #[test]
    fn test_response_missing_images_field() {
        // An empty object must parse to an empty image list, not an error.
        let resp: Img2ImgResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.images.is_empty());
    }
}
