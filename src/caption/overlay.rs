use std::sync::Arc;

use crate::style::caption::CaptionStyle;
use crate::transcript::words::TimedWord;

/// A text overlay tied to one transcript word.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CaptionOverlay {
    /// Word text, unmodified.
    pub text: String,
    /// First visible instant (seconds).
    pub start: f64,
    /// First instant after the overlay disappears (seconds).
    pub end: f64,
    /// Shared style.
    #[serde(skip)]
    pub style: Arc<CaptionStyle>,
}

impl CaptionOverlay {
    /// Visible on the half-open interval `[start, end)`.
    pub fn is_visible(&self, t: f64) -> bool {
        self.start <= t && t < self.end
    }

    /// Visible span in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Build one overlay per word, in transcript order.
pub fn build_overlays(words: &[TimedWord], style: Arc<CaptionStyle>) -> Vec<CaptionOverlay> {
    words
        .iter()
        .map(|w| CaptionOverlay {
            text: w.text.clone(),
            start: w.start,
            end: w.end,
            style: Arc::clone(&style),
        })
        .collect()
}

/// Indices of overlays visible at `t`, in transcript (draw) order.
pub fn visible_at(overlays: &[CaptionOverlay], t: f64) -> impl Iterator<Item = usize> + '_ {
    overlays
        .iter()
        .enumerate()
        .filter(move |(_, o)| o.is_visible(t))
        .map(|(i, _)| i)
}

#[cfg(test)]
#[path = "../../tests/unit/caption/overlay.rs"]
mod tests;
