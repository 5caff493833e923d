//! Bot-API file client.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{FileError, FileResult};

/// Configuration for the file API client.
#[derive(Debug, Clone)]
pub struct FileApiConfig {
    /// Base URL of the bot API server.
    pub base_url: String,
    /// Bot token used in request paths.
    pub token: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl FileApiConfig {
    /// Create config from environment variables.
    ///
    /// `BOT_TOKEN` is required; `BOT_API_URL` defaults to the hosted
    /// bot API.
    pub fn from_env() -> FileResult<Self> {
        let token = std::env::var("BOT_TOKEN").map_err(|_| FileError::Api {
            description: "BOT_TOKEN is not set".to_string(),
        })?;

        Ok(Self {
            base_url: std::env::var("BOT_API_URL")
                .unwrap_or_else(|_| "https://api.telegram.org".to_string()),
            token,
            timeout: Duration::from_secs(
                std::env::var("BOT_API_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
        })
    }
}

/// Response envelope for `getFile`.
#[derive(Debug, Deserialize)]
struct GetFileResponse {
    ok: bool,
    #[serde(default)]
    result: Option<FileInfo>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FileInfo {
    #[serde(default)]
    file_path: Option<String>,
}

/// Client for resolving and downloading bot files.
pub struct FileApi {
    http: Client,
    config: FileApiConfig,
}

impl FileApi {
    /// Create a new client.
    pub fn new(config: FileApiConfig) -> FileResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(FileError::Transport)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> FileResult<Self> {
        Self::new(FileApiConfig::from_env()?)
    }

    /// Resolve an opaque file reference and download its bytes.
    pub async fn resolve_and_download(&self, file_id: &str) -> FileResult<Vec<u8>> {
        let file_path = self.resolve(file_id).await?;
        self.download(&file_path).await
    }

    /// Resolve a file reference to a server-side path.
    async fn resolve(&self, file_id: &str) -> FileResult<String> {
        let url = format!("{}/bot{}/getFile", self.config.base_url, self.config.token);

        let response = self
            .http
            .get(&url)
            .query(&[("file_id", file_id)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FileError::Status {
                status: response.status().as_u16(),
            });
        }

        let envelope: GetFileResponse = response.json().await?;
        if !envelope.ok {
            return Err(FileError::Api {
                description: envelope
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        envelope
            .result
            .and_then(|info| info.file_path)
            .ok_or(FileError::MissingPath)
    }

    /// Download file bytes by server-side path.
    async fn download(&self, file_path: &str) -> FileResult<Vec<u8>> {
        let url = format!(
            "{}/file/bot{}/{}",
            self.config.base_url, self.config.token, file_path
        );
        debug!(file_path, "downloading source file");

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FileError::Status {
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(FileError::Empty);
        }

        debug!(bytes = bytes.len(), "source file downloaded");
        Ok(bytes.to_vec())
    }
}
