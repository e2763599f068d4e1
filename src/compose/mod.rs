//! Frame composition: the immutable render description and the per-frame rasterizer.

/// Per-frame rasterizer over a prepared [`frame::Scene`].
pub mod frame;
/// `RenderSpec`: segments, overlays, audio and output format.
pub mod spec;
