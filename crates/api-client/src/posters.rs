//! Client for the third-party poster-metadata service.
//!
//! Lookups are keyed by the record's `tmdbId`. The service answers with a
//! relative `poster_path` that is joined to a fixed image base URL.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use model::TmdbId;

use crate::error::LookupError;

pub const DEFAULT_POSTER_API_BASE: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_POSTER_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

/// Configuration for poster lookups.
///
/// Lookups are only performed when a config exists, which in turn requires
/// an API key.
#[derive(Debug, Clone)]
pub struct PosterConfig {
    pub api_key: String,
    pub api_base: String,
    pub image_base: String,
    pub timeout_secs: u64,
}

impl PosterConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_POSTER_API_BASE.to_string(),
            image_base: DEFAULT_POSTER_IMAGE_BASE.to_string(),
            timeout_secs: 10,
        }
    }
}

/// Resolves a lookup key to a displayable image URL
#[async_trait]
pub trait PosterSource: Send + Sync {
    /// `Ok(None)` means the service answered but has no usable image
    async fn poster_url(&self, tmdb_id: TmdbId) -> Result<Option<String>, LookupError>;
}

#[derive(Debug, Deserialize)]
struct MovieDetails {
    #[serde(default)]
    poster_path: Option<String>,
}

/// HTTP client for `GET /movie/{id}` on the poster-metadata service
#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    config: PosterConfig,
}

impl TmdbClient {
    pub fn new(config: PosterConfig) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LookupError::Build(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn image_url(&self, poster_path: &str) -> String {
        format!(
            "{}/{}",
            self.config.image_base.trim_end_matches('/'),
            poster_path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl PosterSource for TmdbClient {
    async fn poster_url(&self, tmdb_id: TmdbId) -> Result<Option<String>, LookupError> {
        let url = format!(
            "{}/movie/{}",
            self.config.api_base.trim_end_matches('/'),
            tmdb_id
        );
        debug!("Looking up poster for tmdb id {}", tmdb_id);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(LookupError::Transport)?;

        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await.map_err(LookupError::Transport)?;
        let details: MovieDetails = serde_json::from_slice(&body)
            .map_err(|e| LookupError::InvalidResponse(e.to_string()))?;

        Ok(details
            .poster_path
            .filter(|path| !path.trim().is_empty())
            .map(|path| self.image_url(&path)))
    }
}
