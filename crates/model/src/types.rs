//! Core domain types for recommendation results.
//!
//! These mirror the JSON records returned by the recommendation backend.
//! Every value here is transient: it is replaced wholesale on each fetch
//! and never mutated in place.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, ValidationError};

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of a movie as assigned by the recommendation backend
pub type MovieId = u32;

/// Identifier of a movie in the external poster-metadata service
pub type TmdbId = u64;

/// Ordered recommendations from one successful call.
///
/// The order is the backend's ranking and is preserved for display.
pub type RecommendationResult = Vec<Recommendation>;

/// Number of results requested when nothing else is configured
pub const DEFAULT_TOP_K: usize = 10;

// =============================================================================
// Recommendation
// =============================================================================

/// A single recommended movie.
///
/// Only `movieId` and `title` are required on the wire. The backend leaves
/// out `poster`, `genres` and `tmdbId` for most records, so every other
/// field falls back to an empty or zero value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    pub title: String,
    /// Direct poster URL, when the backend already knows one
    #[serde(default)]
    pub poster: Option<String>,
    /// Predicted rating, expected in 0..=5
    #[serde(default, deserialize_with = "null_as_default")]
    pub predicted_rating: f64,
    /// Model-estimated affinity in 0..=100
    #[serde(default, deserialize_with = "null_as_default")]
    pub match_percentage: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub explanation: String,
    /// Key for the secondary poster lookup
    #[serde(rename = "tmdbId", default)]
    pub tmdb_id: Option<TmdbId>,
}

/// Decode `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Recommendation {
    /// The direct poster URL, ignoring blank strings
    pub fn poster_url(&self) -> Option<&str> {
        self.poster
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

// =============================================================================
// Query and Request
// =============================================================================

/// A validated user identifier.
///
/// The identifier is opaque: it is trimmed and must be non-empty, nothing
/// more. Whether the backend knows the user is decided by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserQuery(String);

impl UserQuery {
    /// Validate raw input text
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parameters of one call to the recommendation endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRequest {
    pub user_id: UserQuery,
    pub top_k: usize,
}

impl RecommendationRequest {
    pub fn new(user_id: UserQuery, top_k: usize) -> Self {
        Self { user_id, top_k }
    }
}
