//! UI layer of the ReelSense recommendation client.
//!
//! This crate wires the three logical components together:
//! - **input**: the input bar holding the user id text
//! - **fetcher**: the request state machine (last submit wins)
//! - **render** / **card** / **grid**: the result renderer, card view models
//!   and the mounted grid that runs per-card poster lookups
//!
//! ## Example Usage
//! ```ignore
//! let config = AppConfig::default();
//! let fetcher = RecommendationFetcher::new(config.recommendation_source()?, config.top_k);
//!
//! fetcher.fetch("1").await?;
//! let snapshot = fetcher.snapshot();
//! let grid = snapshot
//!     .state
//!     .results()
//!     .map(|results| CardGrid::mount(snapshot.generation, results, config.poster_source()));
//! let view = render_view(&snapshot, grid.as_ref());
//! ```

pub mod card;
pub mod config;
pub mod fetcher;
pub mod grid;
pub mod input;
pub mod poster;
pub mod render;

pub use card::{CardView, MAX_GENRE_TAGS, MatchBar, PosterDisplay, format_match, format_rating};
pub use config::AppConfig;
pub use fetcher::{FetchOutcome, FetchSnapshot, PendingFetch, RecommendationFetcher};
pub use grid::{CardGrid, Focus};
pub use input::InputBar;
pub use poster::{PosterSlot, run_lookup};
pub use render::{LOADING_PLACEHOLDERS, View, render_view};
