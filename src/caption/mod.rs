//! Caption Compositor: one overlay per transcript word, typeset once and drawn while visible.

/// Font resolution from file paths or installed family names.
pub mod fonts;
/// Word-to-overlay mapping and visibility.
pub mod overlay;
/// Text layout and glyph drawing.
pub mod text;
