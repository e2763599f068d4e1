use std::path::Path;

use crate::assets::decode::{PreparedImage, decode_image};
use crate::assets::discover::ImageAsset;
use crate::assets::media::{AudioTrack, media_duration_secs};
use crate::foundation::error::{ReelError, ReelResult};

/// Decoding capability consumed by the pipeline.
///
/// Implementations report an unreadable source as [`ReelError::MissingAsset`] and a readable but
/// undecodable image as [`ReelError::Decode`]; the pipeline treats only the latter as recoverable.
pub trait Decoder {
    /// Open the audio track at `path` and report its duration.
    fn load_audio(&self, path: &Path) -> ReelResult<AudioTrack>;
    /// Decode one still image to premultiplied RGBA8.
    fn decode_image(&self, asset: &ImageAsset) -> ReelResult<PreparedImage>;
}

/// Default decoder: the `image` crate for stills, system `ffprobe` for audio duration.
#[derive(Clone, Copy, Debug, Default)]
pub struct MediaDecoder;

impl MediaDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for MediaDecoder {
    fn load_audio(&self, path: &Path) -> ReelResult<AudioTrack> {
        let duration = media_duration_secs(path)?.ok_or_else(|| {
            ReelError::invalid_input(format!(
                "could not determine audio duration of '{}'",
                path.display()
            ))
        })?;
        AudioTrack::new(path, duration)
    }

    fn decode_image(&self, asset: &ImageAsset) -> ReelResult<PreparedImage> {
        let bytes = std::fs::read(&asset.path).map_err(|e| {
            ReelError::missing_asset(format!(
                "failed to read image '{}': {e}",
                asset.path.display()
            ))
        })?;
        decode_image(&bytes).map_err(|e| match e {
            ReelError::Decode(msg) => {
                ReelError::decode(format!("image '{}': {msg}", asset.path.display()))
            }
            other => other,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decoder.rs"]
mod tests;
