//! Motion Renderer: canvas fitting and the sinusoidal zoom applied within each segment.

/// Zoom curve, canvas fitting and per-segment clips.
pub mod zoom;
