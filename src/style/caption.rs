use serde::{Deserialize, Serialize};

use crate::foundation::error::{ReelError, ReelResult};
use crate::style::color::ColorDef;

/// Default caption font file, relative to the working directory.
pub const DEFAULT_FONT: &str = "static/fonts/Corben-Bold.ttf";

/// Placement of a caption block along one screen axis.
///
/// On the wire: `"left"`/`"top"`, `"center"`, `"right"`/`"bottom"`, or a pixel offset of the
/// block's leading edge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Anchor {
    /// Flush with the left (x) or top (y) edge.
    Start,
    /// Centered on the axis.
    #[default]
    Center,
    /// Flush with the right (x) or bottom (y) edge.
    End,
    /// Leading edge at a fixed pixel offset.
    Px(f64),
}

impl Anchor {
    /// Leading-edge offset of a block of `content` pixels on an axis of `extent` pixels.
    pub fn resolve(self, extent: f64, content: f64) -> f64 {
        match self {
            Anchor::Start => 0.0,
            Anchor::Center => (extent - content) / 2.0,
            Anchor::End => extent - content,
            Anchor::Px(v) => v,
        }
    }
}

impl Serialize for Anchor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Anchor::Start => serializer.serialize_str("start"),
            Anchor::Center => serializer.serialize_str("center"),
            Anchor::End => serializer.serialize_str("end"),
            Anchor::Px(v) => serializer.serialize_f64(*v),
        }
    }
}

impl<'de> Deserialize<'de> for Anchor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Name(String),
            Px(f64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Px(v) if v.is_finite() => Ok(Anchor::Px(v)),
            Repr::Px(_) => Err(serde::de::Error::custom("anchor offset must be finite")),
            Repr::Name(s) => match s.trim().to_ascii_lowercase().as_str() {
                "left" | "top" | "start" => Ok(Anchor::Start),
                "center" | "middle" => Ok(Anchor::Center),
                "right" | "bottom" | "end" => Ok(Anchor::End),
                other => Err(serde::de::Error::custom(format!(
                    "unknown anchor \"{other}\" (use left/top, center, right/bottom or a pixel offset)"
                ))),
            },
        }
    }
}

/// Caption appearance shared by every overlay in a render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionStyle {
    /// Font file path (TTF/OTF/TTC) or installed family name such as `"liberation-sans"`.
    pub font: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Fill color.
    pub font_color: ColorDef,
    /// Outline width in pixels; `0` disables the outline.
    pub stroke_width: f32,
    /// Outline color.
    pub stroke_color: ColorDef,
    /// Horizontal anchor.
    #[serde(alias = "positionX")]
    pub position_x: Anchor,
    /// Vertical anchor.
    #[serde(alias = "positionY")]
    pub position_y: Anchor,
    /// Line-wrap width as a fraction of the canvas width.
    pub max_width_ratio: f64,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font: DEFAULT_FONT.to_owned(),
            font_size: 40.0,
            font_color: ColorDef::YELLOW,
            stroke_width: 0.0,
            stroke_color: ColorDef::BLACK,
            position_x: Anchor::Center,
            position_y: Anchor::Center,
            max_width_ratio: 0.9,
        }
    }
}

impl CaptionStyle {
    /// Validate the font setting and numeric fields.
    pub fn validate(&self) -> ReelResult<()> {
        if self.font.trim().is_empty() {
            return Err(ReelError::invalid_input("caption font must not be empty"));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ReelError::invalid_input(
                "caption font_size must be finite and > 0",
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(ReelError::invalid_input(
                "caption stroke_width must be finite and >= 0",
            ));
        }
        if !(self.max_width_ratio > 0.0 && self.max_width_ratio <= 1.0) {
            return Err(ReelError::invalid_input(
                "caption max_width_ratio must be in (0, 1]",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/caption.rs"]
mod tests;
