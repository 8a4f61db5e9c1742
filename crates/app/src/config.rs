//! Application configuration.
//!
//! Built once by the binary and handed down explicitly; nothing in this
//! crate reads the environment.

use std::sync::Arc;

use tracing::warn;

use api_client::{
    ClientConfig, ClientError, PosterConfig, PosterSource, RecommendationClient,
    RecommendationSource, TmdbClient,
};
use model::DEFAULT_TOP_K;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: ClientConfig,
    /// Result count requested per submit
    pub top_k: usize,
    /// Poster lookups are disabled when `None`
    pub poster: Option<PosterConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: ClientConfig::default(),
            top_k: DEFAULT_TOP_K,
            poster: None,
        }
    }
}

impl AppConfig {
    /// Enable poster lookups if `api_key` is present and non-blank
    pub fn with_poster_api_key(mut self, api_key: Option<String>) -> Self {
        self.poster = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .map(PosterConfig::new);
        self
    }

    pub fn recommendation_client(&self) -> Result<RecommendationClient, ClientError> {
        RecommendationClient::new(&self.backend)
    }

    pub fn recommendation_source(&self) -> Result<Arc<dyn RecommendationSource>, ClientError> {
        let client: Arc<dyn RecommendationSource> = Arc::new(self.recommendation_client()?);
        Ok(client)
    }

    /// Poster source, or `None` when lookups are disabled or unusable
    pub fn poster_source(&self) -> Option<Arc<dyn PosterSource>> {
        let config = self.poster.clone()?;
        match TmdbClient::new(config) {
            Ok(client) => {
                let source: Arc<dyn PosterSource> = Arc::new(client);
                Some(source)
            }
            Err(err) => {
                warn!("Poster lookups disabled: {}", err);
                None
            }
        }
    }
}
