//! reelforge turns a folder of still images, a voice track and a word-level transcript into a
//! portrait short-form video.
//!
//! A render runs three stages in order, then encodes:
//!
//! - the Timeline Allocator splits the audio duration evenly across the images
//!   ([`timeline::allocator::allocate`]);
//! - the Motion Renderer resizes each image to the canvas and applies a sinusoidal zoom
//!   ([`ZoomMotion`]);
//! - the Caption Compositor turns each transcript word into an overlay visible on
//!   `[start, end)` ([`caption::overlay::build_overlays`]).
//!
//! [`RenderSession`] drives the stages and streams composited frames into an [`Encoder`];
//! [`FfmpegEncoder`] writes H.264/AAC MP4 through the system `ffmpeg`.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Media discovery, image decoding and audio probing.
pub mod assets;
/// Caption overlays and text rendering.
pub mod caption;
/// Render description and frame compositing.
pub mod compose;
/// Frame encoders.
pub mod encode;
/// Canvas fitting and zoom motion.
pub mod motion;
/// Render orchestration.
pub mod pipeline;
/// Caption style, colors and render configuration.
pub mod style;
/// Uniform timeline allocation.
pub mod timeline;
/// Word-level transcripts.
pub mod transcript;

pub use crate::foundation::core::{Affine, Canvas, Fps, FrameIndex, FrameRange, Point};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::assets::decode::PreparedImage;
pub use crate::assets::decoder::{Decoder, MediaDecoder};
pub use crate::assets::discover::{ImageAsset, MediaBundle};
pub use crate::assets::media::AudioTrack;
pub use crate::caption::fonts::{FontLibrary, system_font_families};
pub use crate::caption::overlay::CaptionOverlay;
pub use crate::compose::frame::FrameRGBA;
pub use crate::compose::spec::RenderSpec;
pub use crate::encode::encoder::{AudioInput, EncodeConfig, Encoder, InMemoryEncoder};
pub use crate::encode::ffmpeg::{FfmpegEncoder, FfmpegEncoderOpts, is_ffmpeg_on_path};
pub use crate::motion::zoom::ZoomMotion;
pub use crate::pipeline::render::{
    DroppedImage, RenderReport, RenderSession, RenderState, render_video,
};
pub use crate::style::caption::{Anchor, CaptionStyle};
pub use crate::style::color::ColorDef;
pub use crate::style::config::RenderConfig;
pub use crate::timeline::allocator::DropPolicy;
pub use crate::timeline::segment::TimelineSegment;
pub use crate::transcript::words::{TimedWord, Transcript};
