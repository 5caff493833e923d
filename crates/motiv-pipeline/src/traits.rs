//! Seam traits for the pipeline's external collaborators.
//!
//! The orchestrator only ever talks to these traits. Production code
//! plugs in the HTTP clients; tests plug in scripted fakes.

use async_trait::async_trait;

use motiv_files::{FileApi, FileResult};
use motiv_models::GenerationParams;
use motiv_sd_client::{SdClient, SdResult};

/// Produces one stylized frame per call.
#[async_trait]
pub trait FrameGenerator: Send + Sync {
    async fn generate_frame(
        &self,
        photo: &[u8],
        style: &str,
        frame_index: u32,
        params: &GenerationParams,
    ) -> SdResult<Vec<u8>>;
}

#[async_trait]
impl FrameGenerator for SdClient {
    async fn generate_frame(
        &self,
        photo: &[u8],
        style: &str,
        frame_index: u32,
        params: &GenerationParams,
    ) -> SdResult<Vec<u8>> {
        SdClient::generate_frame(self, photo, style, frame_index, params).await
    }
}

/// Resolves an opaque file reference and downloads its bytes.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn resolve_and_download(&self, reference: &str) -> FileResult<Vec<u8>>;
}

#[async_trait]
impl SourceFetcher for FileApi {
    async fn resolve_and_download(&self, reference: &str) -> FileResult<Vec<u8>> {
        FileApi::resolve_and_download(self, reference).await
    }
}
