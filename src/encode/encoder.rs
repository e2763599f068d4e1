use std::path::PathBuf;

use crate::compose::frame::FrameRGBA;
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};

/// Configuration provided to an [`Encoder`] before the first frame.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
    /// Audio track muxed into the output.
    pub audio: Option<AudioInput>,
}

/// An encoded audio file to mux alongside the video stream.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioInput {
    /// Source file, decoded by the encoder.
    pub path: PathBuf,
    /// Output is cut to this many seconds.
    pub duration_secs: f64,
}

/// Encoder contract for consuming rendered frames in timeline order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order.
pub trait Encoder: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: EncodeConfig) -> ReelResult<()>;
    /// Push one frame in strictly increasing timeline order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> ReelResult<()>;
    /// Abandon an unfinished encode and discard partial output.
    fn abort(&mut self) {}
}

/// In-memory encoder for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryEncoder {
    cfg: Option<EncodeConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    finished: bool,
}

impl InMemoryEncoder {
    /// Create a new in-memory encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&EncodeConfig> {
        self.cfg.as_ref()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Return `true` once `end` has completed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Output duration implied by the captured frame count.
    pub fn duration_secs(&self) -> Option<f64> {
        self.cfg
            .as_ref()
            .map(|c| c.fps.frames_to_secs(self.frames.len() as u64))
    }
}

impl Encoder for InMemoryEncoder {
    fn begin(&mut self, cfg: EncodeConfig) -> ReelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()> {
        if self.cfg.is_none() {
            return Err(ReelError::encode("in-memory encoder not started"));
        }
        if let Some((last, _)) = self.frames.last()
            && idx.0 <= last.0
        {
            return Err(ReelError::encode("received out-of-order frame index"));
        }
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        self.finished = true;
        Ok(())
    }

    fn abort(&mut self) {
        self.frames.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/encoder.rs"]
mod tests;
