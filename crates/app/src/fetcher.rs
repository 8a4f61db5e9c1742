//! # Recommendation Fetcher
//!
//! Owns the single `RequestState` and drives it through one request/response
//! cycle per submit:
//!
//! ```text
//! Idle ──submit──▶ Loading ──ok──▶ Success(results)
//!   ▲                 │
//!   │                 └──err──▶ Failed(message)
//!   └──── any state ──submit──▶ Loading (previous result/error dropped)
//! ```
//!
//! Every accepted submit bumps a generation counter in the same update that
//! enters `Loading`. A response only commits if its generation is still the
//! current one, so when requests overlap the most recent submit wins no
//! matter which response arrives first. Superseded calls are not aborted;
//! their outcome is dropped.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use api_client::RecommendationSource;
use model::{
    FAILURE_MESSAGE, RecommendationRequest, RequestState, UserQuery, ValidationError,
};

/// Everything the renderer needs from the fetcher
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchSnapshot {
    /// Incremented on every accepted submit
    pub generation: u64,
    pub state: RequestState,
    /// Inline validation message; does not change `state`
    pub notice: Option<String>,
}

/// What happened to a resolved request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was stored in the state
    Committed,
    /// A newer submit happened first; the response was discarded
    Superseded,
}

struct Shared {
    source: Arc<dyn RecommendationSource>,
    top_k: usize,
    state: watch::Sender<FetchSnapshot>,
}

/// State machine for the primary recommendation request.
///
/// Cloning is cheap and every clone drives the same state.
#[derive(Clone)]
pub struct RecommendationFetcher {
    shared: Arc<Shared>,
}

impl RecommendationFetcher {
    pub fn new(source: Arc<dyn RecommendationSource>, top_k: usize) -> Self {
        let (state, _) = watch::channel(FetchSnapshot::default());
        Self {
            shared: Arc::new(Shared {
                source,
                top_k,
                state,
            }),
        }
    }

    pub fn top_k(&self) -> usize {
        self.shared.top_k
    }

    /// Current state, cloned
    pub fn snapshot(&self) -> FetchSnapshot {
        self.shared.state.borrow().clone()
    }

    /// Receiver that wakes on every state change
    pub fn subscribe(&self) -> watch::Receiver<FetchSnapshot> {
        self.shared.state.subscribe()
    }

    /// Accept or reject a query.
    ///
    /// On success the state is already `Loading` when this returns; the
    /// network call happens when the returned `PendingFetch` is resolved.
    /// On rejection only the notice changes and no call is made.
    pub fn submit(&self, raw: &str) -> Result<PendingFetch, ValidationError> {
        let query = match UserQuery::parse(raw) {
            Ok(query) => query,
            Err(err) => {
                debug!("Rejected query {:?}: {}", raw, err);
                self.shared.state.send_modify(|snapshot| {
                    snapshot.notice = Some(err.user_message().to_string());
                });
                return Err(err);
            }
        };

        let mut generation = 0;
        self.shared.state.send_modify(|snapshot| {
            snapshot.generation += 1;
            snapshot.state = RequestState::Loading;
            snapshot.notice = None;
            generation = snapshot.generation;
        });
        info!("Submitted user {} (generation {})", query, generation);

        Ok(PendingFetch {
            shared: self.shared.clone(),
            request: RecommendationRequest::new(query, self.shared.top_k),
            generation,
        })
    }

    /// Submit and wait for the outcome
    pub async fn fetch(&self, raw: &str) -> Result<FetchOutcome, ValidationError> {
        let pending = self.submit(raw)?;
        Ok(pending.resolve().await)
    }
}

/// An accepted submit whose network call has not been made yet
#[must_use = "the request is only sent when the fetch is resolved"]
pub struct PendingFetch {
    shared: Arc<Shared>,
    request: RecommendationRequest,
    generation: u64,
}

impl PendingFetch {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &RecommendationRequest {
        &self.request
    }

    /// Perform the call and commit its outcome if still current
    pub async fn resolve(self) -> FetchOutcome {
        let next = match self.shared.source.fetch(&self.request).await {
            Ok(results) => {
                info!(
                    "Received {} recommendations for user {}",
                    results.len(),
                    self.request.user_id
                );
                RequestState::Success(results)
            }
            Err(err) => {
                warn!(
                    "Recommendation request for user {} failed: {}",
                    self.request.user_id, err
                );
                RequestState::Failed(FAILURE_MESSAGE.to_string())
            }
        };

        let generation = self.generation;
        let committed = self.shared.state.send_if_modified(|snapshot| {
            if snapshot.generation != generation {
                return false;
            }
            snapshot.state = next;
            true
        });

        if committed {
            FetchOutcome::Committed
        } else {
            debug!(
                "Discarding response for user {} (generation {} superseded)",
                self.request.user_id, generation
            );
            FetchOutcome::Superseded
        }
    }
}
