//! Client for the recommendation backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use model::{RecommendationRequest, RecommendationResult};

use crate::error::ClientError;

/// Backend origin used when nothing else is configured
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Configuration for the recommendation HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin of the recommendation backend (e.g., "http://127.0.0.1:8000")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Anything that can answer a recommendation request.
///
/// One call, one answer: implementations must not retry.
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn fetch(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResult, ClientError>;
}

/// Payload of the backend's root endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceStatus {
    pub message: String,
    #[serde(default)]
    pub endpoints: Vec<String>,
}

/// HTTP client for `GET /recommendations`
#[derive(Debug, Clone)]
pub struct RecommendationClient {
    client: Client,
    base_url: String,
}

impl RecommendationClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe the backend root endpoint
    pub async fn status(&self) -> Result<ServiceStatus, ClientError> {
        let url = format!("{}/", self.base_url);
        let body = self.get_body(&url, self.client.get(&url)).await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    async fn get_body(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Vec<u8>, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Recommendation service returned {} for {}", status, url);
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::from_reqwest(url, e))?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl RecommendationSource for RecommendationClient {
    async fn fetch(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResult, ClientError> {
        let url = format!("{}/recommendations", self.base_url);
        info!(
            "Requesting {} recommendations for user {}",
            request.top_k, request.user_id
        );

        let top_k = request.top_k.to_string();
        let builder = self
            .client
            .get(&url)
            .query(&[("user_id", request.user_id.as_str()), ("top_k", top_k.as_str())]);

        let body = self.get_body(&url, builder).await?;
        let results: RecommendationResult = serde_json::from_slice(&body).map_err(|e| {
            debug!("Failed to decode recommendations: {}", e);
            ClientError::InvalidResponse(e.to_string())
        })?;

        debug!(
            "Received {} recommendations for user {}",
            results.len(),
            request.user_id
        );
        Ok(results)
    }
}
