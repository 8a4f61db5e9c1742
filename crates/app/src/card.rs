//! View model of a single recommendation card.

use model::{MovieId, PosterLookupState, Recommendation};

/// Genre tags shown per card
pub const MAX_GENRE_TAGS: usize = 3;

/// Treat NaN/inf like a missing value
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Predicted rating with two decimals, e.g. `4` -> `"4.00"`
pub fn format_rating(rating: f64) -> String {
    format!("{:.2}", finite_or_zero(rating))
}

/// Match percentage with one decimal, e.g. `87.5` -> `"87.5%"`
pub fn format_match(percentage: f64) -> String {
    format!("{:.1}%", finite_or_zero(percentage))
}

/// Proportional bar for the match percentage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchBar {
    percent: f64,
}

impl MatchBar {
    pub fn new(percentage: f64) -> Self {
        Self {
            percent: finite_or_zero(percentage).clamp(0.0, 100.0),
        }
    }

    /// Bar width as a percentage of the full track
    pub fn width_percent(&self) -> f64 {
        self.percent
    }

    /// Filled cells on a track of `width` cells
    pub fn filled_cells(&self, width: usize) -> usize {
        ((self.percent / 100.0) * width as f64).round() as usize
    }
}

/// What to show in the poster area
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterDisplay {
    Image(String),
    /// Lookup still in flight
    Loading,
    Placeholder,
}

impl From<&PosterLookupState> for PosterDisplay {
    fn from(state: &PosterLookupState) -> Self {
        match state {
            PosterLookupState::Resolved(url) => PosterDisplay::Image(url.clone()),
            PosterLookupState::Pending => PosterDisplay::Loading,
            PosterLookupState::Unavailable => PosterDisplay::Placeholder,
        }
    }
}

/// Fully formatted card, ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub key: MovieId,
    /// 1-based position in the result set
    pub rank: usize,
    pub title: String,
    pub poster: PosterDisplay,
    pub rating: String,
    pub match_label: String,
    pub match_bar: MatchBar,
    pub genres: Vec<String>,
    /// Only present while the card has focus
    pub explanation: Option<String>,
}

impl CardView {
    pub fn build(
        rank: usize,
        record: &Recommendation,
        poster: &PosterLookupState,
        focused: bool,
    ) -> Self {
        Self {
            key: record.movie_id,
            rank,
            title: record.title.clone(),
            poster: PosterDisplay::from(poster),
            rating: format_rating(record.predicted_rating),
            match_label: format_match(record.match_percentage),
            match_bar: MatchBar::new(record.match_percentage),
            genres: record.genres.iter().take(MAX_GENRE_TAGS).cloned().collect(),
            explanation: focused.then(|| record.explanation.clone()),
        }
    }
}
