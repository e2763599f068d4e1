use serde::ser::SerializeStruct;

use crate::assets::discover::ImageAsset;

/// A time slot in the visual track assigned to exactly one image.
///
/// The slot is `[start, end)`. `end` is stored rather than derived so the allocator can pin the
/// last segment to the exact audio duration.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineSegment {
    /// Image shown during the slot.
    pub image: ImageAsset,
    /// Absolute start time in seconds.
    pub start: f64,
    /// Absolute end time in seconds (exclusive).
    pub end: f64,
}

impl TimelineSegment {
    /// Slot length in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Local time for absolute time `t` (0 at the segment's own start).
    pub fn local_time(&self, t: f64) -> f64 {
        t - self.start
    }
}

impl serde::Serialize for TimelineSegment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = serializer.serialize_struct("TimelineSegment", 4)?;
        s.serialize_field("image", &self.image)?;
        s.serialize_field("start", &self.start)?;
        s.serialize_field("duration", &self.duration())?;
        s.serialize_field("end", &self.end)?;
        s.end()
    }
}

/// Seconds covered by the visual track: end of the last segment.
pub fn visual_duration(segments: &[TimelineSegment]) -> f64 {
    segments.last().map_or(0.0, |s| s.end)
}

/// Index of the segment shown at absolute time `t`.
///
/// Segments must be sorted by `start` and contiguous. Interior boundaries are decided by the next
/// segment's `start`; only the last segment uses its own `end`. Returns `None` before the first
/// segment and after the last.
pub fn segment_index_at(segments: &[TimelineSegment], t: f64) -> Option<usize> {
    let idx = segments.partition_point(|s| s.start <= t);
    if idx == 0 {
        return None;
    }
    if idx < segments.len() || t < segments[idx - 1].end {
        Some(idx - 1)
    } else {
        None
    }
}
