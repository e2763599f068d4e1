//! Word-level transcripts: the caption clock, independent of the image timeline.

/// Timed transcript words and JSON loading.
pub mod words;
