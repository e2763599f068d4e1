//! Encoding: the `Encoder` capability and its shipped implementations.
//!
//! Encoders consume composited frames in strictly increasing frame order.

/// `Encoder` trait and the in-memory encoder.
pub mod encoder;
/// MP4 output through the system `ffmpeg` binary.
pub mod ffmpeg;
