//! Input bar: holds the query text and forwards submits.

use model::ValidationError;

use crate::fetcher::{PendingFetch, RecommendationFetcher};

#[derive(Debug, Clone, Default)]
pub struct InputBar {
    text: String,
}

impl InputBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn push(&mut self, ch: char) {
        self.text.push(ch);
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Hand the current text to the fetcher; validation happens there
    pub fn submit(&self, fetcher: &RecommendationFetcher) -> Result<PendingFetch, ValidationError> {
        fetcher.submit(&self.text)
    }
}
