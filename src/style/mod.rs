//! Caption styling, colors and the render configuration file.

/// Caption placement and text style.
pub mod caption;
/// Color parsing.
pub mod color;
/// `RenderConfig` and its JSON loader.
pub mod config;
