//! Source assets: media-directory discovery, image decoding and audio probing.

/// Image byte decoding to premultiplied RGBA8.
pub mod decode;
/// The `Decoder` capability and its default implementation.
pub mod decoder;
/// Media-directory discovery and natural filename ordering.
pub mod discover;
/// Audio track metadata via `ffprobe`.
pub mod media;
