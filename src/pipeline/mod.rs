//! Render orchestration: Allocator, Motion Renderer, Caption Compositor, Encode.

/// `RenderSession`, the per-render state machine and its report.
pub mod render;
