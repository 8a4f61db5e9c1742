//! Result renderer: a pure function from fetch state to a view.

use model::{PosterLookupState, RequestState};

use crate::card::CardView;
use crate::fetcher::FetchSnapshot;
use crate::grid::{CardGrid, unique_records};

/// Skeleton cards shown while loading, matching the default page size
pub const LOADING_PLACEHOLDERS: usize = 10;

/// What the results area shows
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Nothing submitted yet
    Idle,
    /// Inline validation message
    Invalid(String),
    Loading { placeholders: usize },
    Failed(String),
    /// Successful call with no records
    Empty,
    Grid(Vec<CardView>),
}

/// Build the view for `snapshot`.
///
/// `grid` supplies poster and focus state when it belongs to the same
/// generation as the snapshot; otherwise cards are built straight from the
/// records with no lookups.
pub fn render_view(snapshot: &FetchSnapshot, grid: Option<&CardGrid>) -> View {
    if let Some(notice) = &snapshot.notice {
        return View::Invalid(notice.clone());
    }

    match &snapshot.state {
        RequestState::Idle => View::Idle,
        RequestState::Loading => View::Loading {
            placeholders: LOADING_PLACEHOLDERS,
        },
        RequestState::Failed(message) => View::Failed(message.clone()),
        RequestState::Success(results) if results.is_empty() => View::Empty,
        RequestState::Success(results) => {
            match grid.filter(|grid| grid.generation() == snapshot.generation) {
                Some(grid) => View::Grid(grid.card_views()),
                None => View::Grid(
                    unique_records(results)
                        .into_iter()
                        .enumerate()
                        .map(|(index, record)| {
                            let poster = PosterLookupState::initial(record, false);
                            CardView::build(index + 1, record, &poster, false)
                        })
                        .collect(),
                ),
            }
        }
    }
}
