use crate::assets::media::AudioTrack;
use crate::caption::overlay::CaptionOverlay;
use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange};
use crate::timeline::segment::{TimelineSegment, visual_duration};

/// Complete, immutable description of one output video.
#[derive(Clone, Debug, serde::Serialize)]
pub struct RenderSpec {
    /// Visual track, contiguous from 0 (after any drops).
    pub segments: Vec<TimelineSegment>,
    /// Caption overlays in transcript order.
    pub overlays: Vec<CaptionOverlay>,
    /// Sole audio source; its duration is the output duration.
    pub audio: AudioTrack,
    /// Output resolution.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
}

impl RenderSpec {
    /// Output duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.audio.duration_secs
    }

    /// Seconds covered by the visual track; shorter than the audio when images were dropped.
    pub fn visual_duration_secs(&self) -> f64 {
        visual_duration(&self.segments)
    }

    /// `max(1, round(duration * fps))`.
    pub fn frame_count(&self) -> u64 {
        self.fps.frames_covering(self.audio.duration_secs)
    }

    /// All output frames.
    pub fn frame_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.frame_count()),
        }
    }

    /// Sample time of frame `f`.
    pub fn frame_time(&self, f: FrameIndex) -> f64 {
        self.fps.frame_time_secs(f)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/spec.rs"]
mod tests;
