//! Timeline Allocator: uniform split of the audio duration across the image sequence.

/// Allocation and post-drop reflow.
pub mod allocator;
/// `TimelineSegment` and lookup helpers.
pub mod segment;
