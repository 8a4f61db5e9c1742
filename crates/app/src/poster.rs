//! Per-card poster lookup.
//!
//! Each lookup owns a clone of its grid's `CancellationToken`. The token is
//! checked while holding the slot lock, right before the result is written,
//! so a lookup that finishes after its card was unmounted changes nothing.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use api_client::PosterSource;
use model::{PosterLookupState, TmdbId};

/// Shared poster state of one mounted card
#[derive(Debug, Clone)]
pub struct PosterSlot(Arc<Mutex<PosterLookupState>>);

impl PosterSlot {
    pub fn new(state: PosterLookupState) -> Self {
        Self(Arc::new(Mutex::new(state)))
    }

    pub fn get(&self) -> PosterLookupState {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Write `next` unless the token was cancelled. Returns whether it wrote.
    pub fn commit(&self, token: &CancellationToken, next: PosterLookupState) -> bool {
        let mut state = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        if token.is_cancelled() {
            return false;
        }
        *state = next;
        true
    }
}

/// Resolve one poster and commit it to `slot`.
///
/// Failures are swallowed into `Unavailable`. Returns `true` if the result
/// was committed, `false` if the card was gone by then.
pub async fn run_lookup(
    source: Arc<dyn PosterSource>,
    tmdb_id: TmdbId,
    slot: PosterSlot,
    token: CancellationToken,
    changed: Arc<Notify>,
) -> bool {
    let next = match source.poster_url(tmdb_id).await {
        Ok(Some(url)) => PosterLookupState::Resolved(url),
        Ok(None) => {
            debug!("No poster available for tmdb id {}", tmdb_id);
            PosterLookupState::Unavailable
        }
        Err(err) => {
            debug!("Poster lookup for tmdb id {} failed: {}", tmdb_id, err);
            PosterLookupState::Unavailable
        }
    };

    if !slot.commit(&token, next) {
        debug!("Discarding poster for tmdb id {}: card unmounted", tmdb_id);
        return false;
    }
    changed.notify_one();
    true
}
