use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{ReelError, ReelResult};

/// One transcript word with its spoken interval in audio-track seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimedWord {
    /// Word text, passed through verbatim (Whisper output keeps a leading space).
    #[serde(rename = "word", alias = "text")]
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds, `>= start`.
    pub end: f64,
}

impl TimedWord {
    /// Create a word without validation.
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// Ordered sequence of timed words.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Transcript {
    words: Vec<TimedWord>,
}

impl Transcript {
    /// Build a validated transcript.
    pub fn new(words: Vec<TimedWord>) -> ReelResult<Self> {
        validate_words(&words)?;
        Ok(Self { words })
    }

    /// Parse a transcript from JSON.
    ///
    /// Accepts either a flat array of `{word, start, end}` records or a Whisper result object
    /// whose `segments[*].words` are flattened in order.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        #[derive(serde::Deserialize)]
        struct WhisperSegment {
            #[serde(default)]
            words: Vec<TimedWord>,
        }

        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flat(Vec<TimedWord>),
            Whisper { segments: Vec<WhisperSegment> },
        }

        let repr: Repr = serde_json::from_reader(r)
            .map_err(|e| ReelError::invalid_input(format!("parse transcript JSON: {e}")))?;
        let words = match repr {
            Repr::Flat(words) => words,
            Repr::Whisper { segments } => segments.into_iter().flat_map(|s| s.words).collect(),
        };
        Self::new(words)
    }

    /// Parse a transcript from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::missing_asset(format!("open transcript '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Borrow the words in order.
    pub fn words(&self) -> &[TimedWord] {
        &self.words
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Return `true` when the transcript has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Check word invariants: finite non-negative times, `end >= start`, non-decreasing `start`.
///
/// Overlapping intervals are accepted; they are rendered as simultaneous captions.
pub fn validate_words(words: &[TimedWord]) -> ReelResult<()> {
    let mut prev_start = f64::NEG_INFINITY;
    for (i, w) in words.iter().enumerate() {
        if !w.start.is_finite() || !w.end.is_finite() {
            return Err(ReelError::invalid_input(format!(
                "word {i} ('{}') has non-finite times",
                w.text
            )));
        }
        if w.start < 0.0 {
            return Err(ReelError::invalid_input(format!(
                "word {i} ('{}') starts before 0",
                w.text
            )));
        }
        if w.end < w.start {
            return Err(ReelError::invalid_input(format!(
                "word {i} ('{}') ends before it starts ({} < {})",
                w.text, w.end, w.start
            )));
        }
        if w.start < prev_start {
            return Err(ReelError::invalid_input(format!(
                "word {i} ('{}') is out of order: start {} < previous start {prev_start}",
                w.text, w.start
            )));
        }
        prev_start = w.start;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/transcript/words.rs"]
mod tests;
