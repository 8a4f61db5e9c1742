//! Mounted card grid.
//!
//! A `CardGrid` is the live counterpart of one successful result set. It
//! owns the poster state of each card and the cancellation token shared by
//! their lookups. Replacing or dropping the grid unmounts it: the token is
//! cancelled and any lookup still in flight finishes without effect.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use api_client::PosterSource;
use model::{MovieId, PosterLookupState, Recommendation};

use crate::card::CardView;
use crate::poster::{PosterSlot, run_lookup};

/// Which cards currently reveal their explanation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    None,
    One(usize),
    All,
}

struct MountedCard {
    record: Recommendation,
    poster: PosterSlot,
}

pub struct CardGrid {
    generation: u64,
    cards: Vec<MountedCard>,
    focus: Focus,
    token: CancellationToken,
    changed: Arc<Notify>,
    lookups: Vec<JoinHandle<bool>>,
}

/// Records in order, keeping only the first occurrence of each id
pub(crate) fn unique_records(records: &[Recommendation]) -> Vec<&Recommendation> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|record| {
            let fresh = seen.insert(record.movie_id);
            if !fresh {
                warn!("Dropping duplicate recommendation for movie {}", record.movie_id);
            }
            fresh
        })
        .collect()
}

impl CardGrid {
    /// Mount one card per record and start poster lookups.
    ///
    /// `generation` ties the grid to the fetch that produced `records`.
    /// Lookups are spawned on the current tokio runtime, so this must be
    /// called from within one when `posters` is set.
    pub fn mount(
        generation: u64,
        records: &[Recommendation],
        posters: Option<Arc<dyn PosterSource>>,
    ) -> Self {
        let token = CancellationToken::new();
        let changed = Arc::new(Notify::new());
        let mut cards = Vec::with_capacity(records.len());
        let mut lookups = Vec::new();

        for record in unique_records(records) {
            let initial = PosterLookupState::initial(record, posters.is_some());
            let slot = PosterSlot::new(initial.clone());

            if let (PosterLookupState::Pending, Some(source), Some(tmdb_id)) =
                (&initial, &posters, record.tmdb_id)
            {
                lookups.push(tokio::spawn(run_lookup(
                    source.clone(),
                    tmdb_id,
                    slot.clone(),
                    token.clone(),
                    changed.clone(),
                )));
            }

            cards.push(MountedCard {
                record: record.clone(),
                poster: slot,
            });
        }

        debug!(
            "Mounted {} cards for generation {} ({} poster lookups)",
            cards.len(),
            generation,
            lookups.len()
        );

        Self {
            generation,
            cards,
            focus: Focus::None,
            token,
            changed,
            lookups,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card keys in display order
    pub fn keys(&self) -> Vec<MovieId> {
        self.cards.iter().map(|card| card.record.movie_id).collect()
    }

    pub fn poster(&self, movie_id: MovieId) -> Option<PosterLookupState> {
        self.cards
            .iter()
            .find(|card| card.record.movie_id == movie_id)
            .map(|card| card.poster.get())
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Reveal the explanation of the card at `index` (0-based)
    pub fn focus_card(&mut self, index: usize) -> bool {
        if index >= self.cards.len() {
            return false;
        }
        self.focus = Focus::One(index);
        true
    }

    pub fn focus_all(&mut self) {
        self.focus = Focus::All;
    }

    pub fn blur(&mut self) {
        self.focus = Focus::None;
    }

    fn is_focused(&self, index: usize) -> bool {
        match self.focus {
            Focus::None => false,
            Focus::One(focused) => focused == index,
            Focus::All => true,
        }
    }

    pub fn card_views(&self) -> Vec<CardView> {
        self.cards
            .iter()
            .enumerate()
            .map(|(index, card)| {
                CardView::build(
                    index + 1,
                    &card.record,
                    &card.poster.get(),
                    self.is_focused(index),
                )
            })
            .collect()
    }

    fn has_pending_posters(&self) -> bool {
        self.cards.iter().any(|card| card.poster.get().is_pending())
    }

    /// Wait until a poster lookup commits
    pub async fn poster_changed(&self) {
        self.changed.notified().await;
    }

    /// Wait until no card is waiting on its poster
    pub async fn wait_posters(&self) {
        while self.has_pending_posters() {
            self.changed.notified().await;
        }
    }

    /// Tear the grid down.
    ///
    /// Lookups keep running but can no longer write. Their handles are
    /// returned for callers that want to observe them finish.
    pub fn unmount(mut self) -> Vec<JoinHandle<bool>> {
        self.token.cancel();
        std::mem::take(&mut self.lookups)
    }
}

impl Drop for CardGrid {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

impl std::fmt::Debug for CardGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardGrid")
            .field("generation", &self.generation)
            .field("cards", &self.keys())
            .field("focus", &self.focus)
            .finish()
    }
}
