use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::assets::discover::DEFAULT_AUDIO_FILE;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::motion::zoom::ZoomMotion;
use crate::style::caption::CaptionStyle;
use crate::style::color::ColorDef;
use crate::timeline::allocator::DropPolicy;

/// Every tunable of a render, loadable from JSON. Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output size; source images are resized to it.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Style shared by every caption overlay.
    pub caption: CaptionStyle,
    /// Zoom applied within each segment.
    pub motion: ZoomMotion,
    /// Timeline behavior when images fail to decode.
    pub drop_policy: DropPolicy,
    /// Color behind images and under the visual tail.
    pub background: ColorDef,
    /// Encoder thread count; `None` lets ffmpeg decide.
    pub threads: Option<usize>,
    /// Composite frames on a rayon pool in chunks.
    pub parallel: bool,
    /// Frames per parallel chunk.
    pub chunk_size: usize,
    /// Audio file name inside the media directory.
    pub audio_file: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            fps: Fps::default(),
            caption: CaptionStyle::default(),
            motion: ZoomMotion::default(),
            drop_policy: DropPolicy::default(),
            background: ColorDef::BLACK,
            threads: Some(8),
            parallel: false,
            chunk_size: 64,
            audio_file: DEFAULT_AUDIO_FILE.to_owned(),
        }
    }
}

impl RenderConfig {
    /// Parse and validate a config from JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| ReelError::invalid_input(format!("parse render config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a config file.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::missing_asset(format!("open render config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check values that would otherwise fail deep inside rendering or encoding.
    pub fn validate(&self) -> ReelResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ReelError::invalid_input("canvas width/height must be > 0"));
        }
        // yuv420p needs even dimensions.
        if self.canvas.width % 2 != 0 || self.canvas.height % 2 != 0 {
            return Err(ReelError::invalid_input(format!(
                "canvas must have even dimensions, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        self.caption.validate()?;
        self.motion.validate()?;
        if self.threads == Some(0) {
            return Err(ReelError::invalid_input("threads must be > 0 when set"));
        }
        if self.chunk_size == 0 {
            return Err(ReelError::invalid_input("chunk_size must be > 0"));
        }
        if self.audio_file.trim().is_empty() {
            return Err(ReelError::invalid_input("audio_file must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/config.rs"]
mod tests;
