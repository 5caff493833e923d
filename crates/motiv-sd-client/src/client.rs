//! Generation service HTTP client.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use tracing::{debug, warn};

use motiv_models::{GenerationParams, StyleCatalog};

use crate::error::{SdError, SdResult};
use crate::types::{Img2ImgRequest, Img2ImgResponse};

/// Configuration for the generation client.
#[derive(Debug, Clone)]
pub struct SdClientConfig {
    /// Base URL of the generation service.
    pub base_url: String,
    /// Per-request timeout. Generation is slow on CPU hosts.
    pub timeout: Duration,
}

impl Default for SdClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:7860".to_string(),
            timeout: Duration::from_secs(300),
        }
    }
}

impl SdClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("SD_API_URL")
                .unwrap_or_else(|_| "http://localhost:7860".to_string()),
            timeout: Duration::from_secs(
                std::env::var("SD_API_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(300),
            ),
        }
    }
}

/// Client for the Stable Diffusion web API.
///
/// Holds the style catalog so that unknown styles are rejected before
/// a single byte goes on the wire.
pub struct SdClient {
    http: Client,
    config: SdClientConfig,
    styles: StyleCatalog,
}

impl SdClient {
    /// Create a new client.
    pub fn new(config: SdClientConfig, styles: StyleCatalog) -> SdResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(SdError::Transport)?;

        Ok(Self {
            http,
            config,
            styles,
        })
    }

    /// Create from environment variables with the stock style catalog.
    pub fn from_env() -> SdResult<Self> {
        Self::new(SdClientConfig::from_env(), StyleCatalog::default())
    }

    /// The configured style catalog.
    pub fn styles(&self) -> &StyleCatalog {
        &self.styles
    }

    /// Check whether the generation service is reachable.
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/sdapi/v1/options", self.config.base_url);

        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!("generation service health check failed: {}", response.status());
                false
            }
            Err(e) => {
                warn!("generation service health check error: {}", e);
                false
            }
        }
    }

    /// Generate one stylized frame from the source photo.
    ///
    /// Returns exactly one decoded image payload on success. No retry
    /// happens here; the caller owns skip/retry policy.
    pub async fn generate_frame(
        &self,
        photo: &[u8],
        style: &str,
        frame_index: u32,
        params: &GenerationParams,
    ) -> SdResult<Vec<u8>> {
        // Reject unknown styles before touching the network.
        let spec = self.styles.resolve(style)?;

        let request = Img2ImgRequest::for_frame(
            STANDARD.encode(photo),
            &spec.prompt,
            frame_index,
            params,
        );

        let url = format!("{}/sdapi/v1/img2img", self.config.base_url);
        debug!(style, frame_index, "sending img2img request to {}", url);

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(SdError::Transport)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SdError::Service { status, body });
        }

        let body: Img2ImgResponse = response.json().await.map_err(SdError::Transport)?;

        let first = body.images.first().ok_or(SdError::EmptyResult)?;
        let payload = STANDARD.decode(first)?;

        debug!(frame_index, bytes = payload.len(), "frame generated");
        Ok(payload)
    }
}
