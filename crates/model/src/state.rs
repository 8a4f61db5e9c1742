//! UI state enums.
//!
//! Exactly one variant holds at a time. Transitions are driven elsewhere:
//! `RequestState` by the fetcher in the `app` crate, `PosterLookupState` by
//! each card's own lookup.

use crate::types::{Recommendation, RecommendationResult};

/// Generic text shown for any failure of the recommendation call.
///
/// The underlying error is logged, never displayed.
pub const FAILURE_MESSAGE: &str =
    "Failed to fetch recommendations. Please check the User ID or try again.";

/// Lifecycle of the primary recommendation request
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(RecommendationResult),
    Failed(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    /// The stored results, if the last request succeeded
    pub fn results(&self) -> Option<&[Recommendation]> {
        match self {
            RequestState::Success(results) => Some(results),
            _ => None,
        }
    }
}

/// Per-card poster resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterLookupState {
    Pending,
    Resolved(String),
    Unavailable,
}

impl PosterLookupState {
    /// Starting state for a card.
    ///
    /// A direct poster URL wins. Otherwise a lookup key only means something
    /// when lookups are enabled (an API key is configured).
    pub fn initial(record: &Recommendation, lookups_enabled: bool) -> Self {
        if let Some(url) = record.poster_url() {
            return PosterLookupState::Resolved(url.to_string());
        }
        match record.tmdb_id {
            Some(_) if lookups_enabled => PosterLookupState::Pending,
            _ => PosterLookupState::Unavailable,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, PosterLookupState::Pending)
    }
}
